//! Reporting-structure resolution.
//!
//! Employees list their direct reports by id, so the organization is a directed
//! graph that may contain convergent paths (two managers sharing a report) and,
//! when bad data was saved, cycles. [`HierarchyResolver`] walks that graph from
//! one root employee to count everyone below it and, on request, to replace the
//! id stubs with fully populated employees at every level.
//!
//! Each call to [`HierarchyResolver::resolve`] gets its own lookup cache and its
//! own set of ids on the active path. An id is only considered part of a cycle
//! if it is met again while still on that path; siblings that converge on the
//! same report are fine.

use std::collections::{HashMap, HashSet};

use anyhow::Context;
use thiserror::Error;

use crate::models::{DirectReport, Employee, ReportingStructure};
use crate::store::EmployeeStore;

/// Reasons a reporting structure could not be produced.
#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("Employee not found for employeeId: {0}")]
    NotFound(String),

    /// The graph loops back onto an employee on the current path.
    #[error("Circular reference detected for employeeId: {0}")]
    CircularReference(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Builds [`ReportingStructure`]s from an [`EmployeeStore`].
#[derive(Debug, Clone)]
pub struct HierarchyResolver<S> {
    store: S,
}

impl<S: EmployeeStore> HierarchyResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolve the reporting structure below `root_id`.
    ///
    /// With `include_details`, the returned employee has every direct-report
    /// list replaced by resolved employees, in the stored order. Without it,
    /// the root's direct-report list is omitted.
    ///
    /// Fails on the first unknown id, cycle, or store error; nothing partial is
    /// returned.
    pub fn resolve(
        &self,
        root_id: &str,
        include_details: bool,
    ) -> Result<ReportingStructure, HierarchyError> {
        tracing::debug!(
            employee_id = root_id,
            include_details,
            "Building reporting structure"
        );

        let mut root = fetch_employee(&self.store, root_id)?;
        let mut context = ResolutionContext::new(&self.store);
        context.cache.insert(root.employee_id.clone(), root.clone());

        if include_details {
            context.expand(&mut root)?;
        }

        let number_of_reports = context.count(&root)?;

        if !include_details {
            root.direct_reports = None;
        }

        Ok(ReportingStructure {
            employee: root,
            number_of_reports,
        })
    }
}

fn fetch_employee<S: EmployeeStore + ?Sized>(
    store: &S,
    employee_id: &str,
) -> Result<Employee, HierarchyError> {
    store
        .fetch(employee_id)
        .with_context(|| format!("Failed to look up employeeId: {}", employee_id))?
        .ok_or_else(|| HierarchyError::NotFound(employee_id.to_string()))
}

/// Per-call traversal state.
struct ResolutionContext<'a, S: ?Sized> {
    store: &'a S,
    /// Employees as fetched from the store, direct reports still stubs.
    cache: HashMap<String, Employee>,
    /// Ids on the active traversal path.
    in_progress: HashSet<String>,
}

impl<'a, S: EmployeeStore + ?Sized> ResolutionContext<'a, S> {
    fn new(store: &'a S) -> Self {
        Self {
            store,
            cache: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn lookup(&mut self, employee_id: &str) -> Result<Employee, HierarchyError> {
        if let Some(employee) = self.cache.get(employee_id) {
            return Ok(employee.clone());
        }

        let employee = fetch_employee(self.store, employee_id)?;
        self.cache
            .insert(employee_id.to_string(), employee.clone());
        Ok(employee)
    }

    fn enter(&mut self, employee_id: &str) -> Result<(), HierarchyError> {
        if !self.in_progress.insert(employee_id.to_string()) {
            return Err(HierarchyError::CircularReference(employee_id.to_string()));
        }
        Ok(())
    }

    fn leave(&mut self, employee_id: &str) {
        self.in_progress.remove(employee_id);
    }

    /// Replace the stubs below `employee` with resolved employees, depth-first.
    fn expand(&mut self, employee: &mut Employee) -> Result<(), HierarchyError> {
        tracing::debug!(employee_id = %employee.employee_id, "Expanding hierarchy");

        self.enter(&employee.employee_id)?;

        if employee.has_direct_reports() {
            let report_ids: Vec<String> =
                employee.direct_report_ids().map(str::to_owned).collect();

            let mut resolved = Vec::with_capacity(report_ids.len());
            for report_id in &report_ids {
                let mut report = self.lookup(report_id)?;
                self.expand(&mut report)?;
                resolved.push(DirectReport::Resolved(Box::new(report)));
            }
            employee.direct_reports = Some(resolved);
        }

        self.leave(&employee.employee_id);
        Ok(())
    }

    /// Count the direct-report edges below `employee`, depth-first.
    fn count(&mut self, employee: &Employee) -> Result<usize, HierarchyError> {
        tracing::debug!(employee_id = %employee.employee_id, "Counting reports");

        let mut count = 0;
        for report_id in employee.direct_report_ids() {
            self.enter(report_id)?;
            let report = self.lookup(report_id)?;
            count += 1 + self.count(&report)?;
            self.leave(report_id);
        }

        Ok(count)
    }
}
