mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Row};
use thiserror::Error;
use uuid::Uuid;

use crate::models::*;
use orgchart_core::EmployeeStore;

/// Storage format of compensation effective dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A write would break a uniqueness rule.
///
/// Returned inside an [`anyhow::Error`]; callers that care can downcast.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DuplicateEntity(pub String);

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Employee operations
    // ============================================================

    pub fn list_employees(&self) -> Result<Vec<Employee>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT employee_id, first_name, last_name, position, department
             FROM employees ORDER BY last_name, first_name",
        )?;

        let mut employees = stmt
            .query_map([], employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        for employee in &mut employees {
            employee.direct_reports = Some(load_direct_reports(&conn, &employee.employee_id)?);
        }

        Ok(employees)
    }

    /// Look up one employee. Direct reports come back as stubs in stored order.
    pub fn get_employee(&self, id: &str) -> Result<Option<Employee>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT employee_id, first_name, last_name, position, department
             FROM employees WHERE employee_id = ?",
        )?;

        let mut rows = stmt.query([id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut employee = employee_from_row(row)?;
        employee.direct_reports = Some(load_direct_reports(&conn, id)?);
        Ok(Some(employee))
    }

    pub fn create_employee(&self, input: EmployeeInput) -> Result<Employee> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO employees (employee_id, first_name, last_name, position, department, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                &id,
                &input.first_name,
                &input.last_name,
                &input.position,
                &input.department,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;
        replace_direct_reports(&tx, &id, &input.direct_reports)?;
        tx.commit()?;

        Ok(employee_from_input(id, input))
    }

    /// Replace every mutable field of an employee, including the report list.
    pub fn update_employee(&self, id: &str, input: EmployeeInput) -> Result<Option<Employee>> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        let tx = conn.transaction()?;
        let rows = tx.execute(
            "UPDATE employees SET first_name = ?, last_name = ?, position = ?, department = ?, updated_at = ?
             WHERE employee_id = ?",
            (
                &input.first_name,
                &input.last_name,
                &input.position,
                &input.department,
                now.to_rfc3339(),
                id,
            ),
        )?;

        if rows == 0 {
            return Ok(None);
        }

        replace_direct_reports(&tx, id, &input.direct_reports)?;
        tx.commit()?;

        Ok(Some(employee_from_input(id.to_string(), input)))
    }

    // ============================================================
    // Compensation operations
    // ============================================================

    /// Record a compensation. Fails with [`DuplicateEntity`] if the employee
    /// already has one for `effective_date`.
    pub fn create_compensation(
        &self,
        employee_id: &str,
        salary: f64,
        effective_date: NaiveDate,
    ) -> Result<Compensation> {
        let conn = self.conn.lock().expect("database lock poisoned");

        let exists: i32 = conn.query_row(
            "SELECT COUNT(*) FROM compensations WHERE employee_id = ? AND effective_date = ?",
            (employee_id, effective_date.format(DATE_FORMAT).to_string()),
            |row| row.get(0),
        )?;
        if exists > 0 {
            return Err(DuplicateEntity(format!(
                "Duplicate compensation found for employeeId: {} and effectiveDate: {}",
                employee_id, effective_date
            ))
            .into());
        }

        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO compensations (compensation_id, employee_id, effective_date, salary, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                &id,
                employee_id,
                effective_date.format(DATE_FORMAT).to_string(),
                salary,
                Utc::now().to_rfc3339(),
            ),
        )?;

        Ok(Compensation {
            compensation_id: id,
            employee_id: employee_id.to_string(),
            salary,
            effective_date,
        })
    }

    pub fn get_compensations(&self, employee_id: &str) -> Result<Vec<Compensation>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT compensation_id, employee_id, salary, effective_date
             FROM compensations WHERE employee_id = ? ORDER BY effective_date",
        )?;

        let compensations = stmt
            .query_map([employee_id], compensation_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(compensations)
    }

    pub fn get_compensation(
        &self,
        employee_id: &str,
        effective_date: NaiveDate,
    ) -> Result<Option<Compensation>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT compensation_id, employee_id, salary, effective_date
             FROM compensations WHERE employee_id = ? AND effective_date = ?",
        )?;

        let mut rows = stmt.query((employee_id, effective_date.format(DATE_FORMAT).to_string()))?;
        match rows.next()? {
            Some(row) => Ok(Some(compensation_from_row(row)?)),
            None => Ok(None),
        }
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

impl EmployeeStore for Database {
    fn fetch(&self, employee_id: &str) -> Result<Option<Employee>> {
        self.get_employee(employee_id)
    }
}

/// Database file location: `ORGCHART_DB` if set, else the platform data dir.
pub fn default_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("ORGCHART_DB") {
        return Ok(PathBuf::from(path));
    }

    let dirs = directories::ProjectDirs::from("", "", "orgchart")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join("orgchart.db"))
}

fn employee_from_row(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        employee_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        position: row.get(3)?,
        department: row.get(4)?,
        direct_reports: None,
    })
}

fn employee_from_input(employee_id: String, input: EmployeeInput) -> Employee {
    Employee {
        employee_id,
        first_name: input.first_name,
        last_name: input.last_name,
        position: input.position,
        department: input.department,
        direct_reports: Some(
            input
                .direct_reports
                .into_iter()
                .map(DirectReport::Stub)
                .collect(),
        ),
    }
}

fn compensation_from_row(row: &Row) -> rusqlite::Result<Compensation> {
    Ok(Compensation {
        compensation_id: row.get(0)?,
        employee_id: row.get(1)?,
        salary: row.get(2)?,
        effective_date: parse_date(3, row.get(3)?)?,
    })
}

fn load_direct_reports(conn: &Connection, manager_id: &str) -> Result<Vec<DirectReport>> {
    let mut stmt = conn.prepare(
        "SELECT report_id FROM direct_reports WHERE manager_id = ? ORDER BY ordinal",
    )?;

    let reports = stmt
        .query_map([manager_id], |row| row.get::<_, String>(0))?
        .map(|id| id.map(DirectReport::stub))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(reports)
}

fn replace_direct_reports(
    conn: &Connection,
    manager_id: &str,
    reports: &[EmployeeRef],
) -> Result<()> {
    conn.execute("DELETE FROM direct_reports WHERE manager_id = ?", [manager_id])?;

    let mut stmt = conn.prepare(
        "INSERT INTO direct_reports (manager_id, ordinal, report_id) VALUES (?, ?, ?)",
    )?;
    for (ordinal, report) in reports.iter().enumerate() {
        stmt.execute((manager_id, ordinal as i64, &report.employee_id))?;
    }

    Ok(())
}

fn parse_date(idx: usize, s: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
