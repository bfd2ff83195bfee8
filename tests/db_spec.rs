use chrono::NaiveDate;
use orgchart::db::{Database, DuplicateEntity};
use orgchart::models::*;
use orgchart::store::EmployeeStore;
use speculate2::speculate;

fn employee_input(first: &str, last: &str, reports: &[&str]) -> EmployeeInput {
    EmployeeInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        position: "Developer".to_string(),
        department: "Engineering".to_string(),
        direct_reports: reports.iter().map(|id| EmployeeRef::new(*id)).collect(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn stub_ids(employee: &Employee) -> Vec<String> {
    employee.direct_report_ids().map(str::to_string).collect()
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "employees" {
        describe "create_employee" {
            it "assigns a uuid and keeps all fields" {
                let employee = db.create_employee(employee_input("John", "Lennon", &[]))
                    .expect("Failed to create employee");

                assert!(uuid::Uuid::parse_str(&employee.employee_id).is_ok());
                assert_eq!(employee.first_name, "John");
                assert_eq!(employee.last_name, "Lennon");
                assert_eq!(employee.position, "Developer");
                assert_eq!(employee.department, "Engineering");
                assert_eq!(employee.direct_reports, Some(vec![]));
            }

            it "assigns distinct ids" {
                let a = db.create_employee(employee_input("A", "A", &[])).expect("Failed to create");
                let b = db.create_employee(employee_input("B", "B", &[])).expect("Failed to create");

                assert_ne!(a.employee_id, b.employee_id);
            }

            it "stores direct reports as stubs" {
                let paul = db.create_employee(employee_input("Paul", "McCartney", &[])).expect("Failed to create");
                let ringo = db.create_employee(employee_input("Ringo", "Starr", &[])).expect("Failed to create");

                let john = db.create_employee(employee_input(
                    "John", "Lennon", &[paul.employee_id.as_str(), ringo.employee_id.as_str()],
                )).expect("Failed to create");

                let reports = john.direct_reports.expect("reports should be present");
                assert_eq!(reports, vec![
                    DirectReport::stub(paul.employee_id.clone()),
                    DirectReport::stub(ringo.employee_id.clone()),
                ]);
            }
        }

        describe "get_employee" {
            it "returns None for non-existent employee" {
                let result = db.get_employee("does-not-exist").expect("Query failed");
                assert!(result.is_none());
            }

            it "returns the employee with direct reports in stored order" {
                let b = db.create_employee(employee_input("B", "Second", &[])).expect("Failed to create");
                let a = db.create_employee(employee_input("A", "First", &[])).expect("Failed to create");
                let manager = db.create_employee(employee_input(
                    "M", "Manager", &[b.employee_id.as_str(), a.employee_id.as_str()],
                )).expect("Failed to create");

                let found = db.get_employee(&manager.employee_id)
                    .expect("Query failed")
                    .expect("Employee should exist");

                assert_eq!(found.first_name, "M");
                assert_eq!(stub_ids(&found), vec![b.employee_id, a.employee_id]);
            }

            it "keeps references to employees that do not exist" {
                let manager = db.create_employee(employee_input("M", "Manager", &["ghost"]))
                    .expect("Failed to create");

                let found = db.get_employee(&manager.employee_id).expect("Query failed").unwrap();

                assert_eq!(stub_ids(&found), vec!["ghost".to_string()]);
            }
        }

        describe "list_employees" {
            it "returns empty list when no employees exist" {
                let employees = db.list_employees().expect("Query failed");
                assert!(employees.is_empty());
            }

            it "returns employees ordered by last name" {
                db.create_employee(employee_input("Ringo", "Starr", &[])).expect("Failed to create");
                db.create_employee(employee_input("Pete", "Best", &[])).expect("Failed to create");

                let employees = db.list_employees().expect("Query failed");

                assert_eq!(employees.len(), 2);
                assert_eq!(employees[0].last_name, "Best");
                assert_eq!(employees[1].last_name, "Starr");
            }
        }

        describe "update_employee" {
            it "returns None for non-existent employee" {
                let result = db.update_employee("does-not-exist", employee_input("X", "Y", &[]))
                    .expect("Update failed");
                assert!(result.is_none());
            }

            it "replaces all fields and the direct report list" {
                let old_report = db.create_employee(employee_input("Old", "Report", &[])).expect("Failed to create");
                let new_report = db.create_employee(employee_input("New", "Report", &[])).expect("Failed to create");
                let employee = db.create_employee(employee_input(
                    "John", "Lennon", &[old_report.employee_id.as_str()],
                )).expect("Failed to create");

                let mut input = employee_input("Johnny", "Lennon", &[new_report.employee_id.as_str()]);
                input.position = "Development Manager".to_string();
                let updated = db.update_employee(employee.employee_id.as_str(), input)
                    .expect("Update failed")
                    .expect("Employee should exist");

                assert_eq!(updated.employee_id, employee.employee_id);
                assert_eq!(updated.first_name, "Johnny");

                let found = db.get_employee(&employee.employee_id).expect("Query failed").unwrap();
                assert_eq!(found.position, "Development Manager");
                assert_eq!(stub_ids(&found), vec![new_report.employee_id]);
            }

            it "clears direct reports when given an empty list" {
                let report = db.create_employee(employee_input("R", "Report", &[])).expect("Failed to create");
                let employee = db.create_employee(employee_input("M", "Manager", &[report.employee_id.as_str()]))
                    .expect("Failed to create");

                db.update_employee(employee.employee_id.as_str(), employee_input("M", "Manager", &[]))
                    .expect("Update failed");

                let found = db.get_employee(&employee.employee_id).expect("Query failed").unwrap();
                assert!(!found.has_direct_reports());
            }
        }

        describe "fetch" {
            it "serves the hierarchy resolver the same record as get_employee" {
                let employee = db.create_employee(employee_input("John", "Lennon", &[])).expect("Failed to create");

                let fetched = db.fetch(&employee.employee_id).expect("Fetch failed");

                assert_eq!(fetched, db.get_employee(&employee.employee_id).unwrap());
            }
        }
    }

    describe "compensations" {
        describe "create_compensation" {
            it "records salary and effective date" {
                let compensation = db.create_compensation("emp-1", 85000.0, date(2024, 1, 1))
                    .expect("Failed to create compensation");

                assert!(!compensation.compensation_id.is_empty());
                assert_eq!(compensation.employee_id, "emp-1");
                assert_eq!(compensation.salary, 85000.0);
                assert_eq!(compensation.effective_date, date(2024, 1, 1));
            }

            it "rejects a second compensation for the same date" {
                db.create_compensation("emp-1", 85000.0, date(2024, 1, 1)).expect("Failed to create");

                let err = db.create_compensation("emp-1", 90000.0, date(2024, 1, 1)).unwrap_err();

                let duplicate = err.downcast_ref::<DuplicateEntity>().expect("should be a duplicate");
                assert_eq!(
                    duplicate.to_string(),
                    "Duplicate compensation found for employeeId: emp-1 and effectiveDate: 2024-01-01"
                );
            }

            it "allows the same date for different employees" {
                db.create_compensation("emp-1", 85000.0, date(2024, 1, 1)).expect("Failed to create");
                db.create_compensation("emp-2", 85000.0, date(2024, 1, 1)).expect("Failed to create");
            }
        }

        describe "get_compensations" {
            it "returns empty list for an employee without compensation" {
                let compensations = db.get_compensations("emp-1").expect("Query failed");
                assert!(compensations.is_empty());
            }

            it "returns only that employee's entries ordered by effective date" {
                db.create_compensation("emp-1", 90000.0, date(2025, 1, 1)).expect("Failed to create");
                db.create_compensation("emp-1", 85000.0, date(2024, 1, 1)).expect("Failed to create");
                db.create_compensation("emp-2", 70000.0, date(2024, 6, 1)).expect("Failed to create");

                let compensations = db.get_compensations("emp-1").expect("Query failed");

                assert_eq!(compensations.len(), 2);
                assert_eq!(compensations[0].effective_date, date(2024, 1, 1));
                assert_eq!(compensations[1].effective_date, date(2025, 1, 1));
            }
        }

        describe "get_compensation" {
            it "returns None when no entry matches the date" {
                db.create_compensation("emp-1", 85000.0, date(2024, 1, 1)).expect("Failed to create");

                let result = db.get_compensation("emp-1", date(2024, 1, 2)).expect("Query failed");
                assert!(result.is_none());
            }

            it "returns the entry for the date" {
                let created = db.create_compensation("emp-1", 85000.0, date(2024, 1, 1)).expect("Failed to create");

                let found = db.get_compensation("emp-1", date(2024, 1, 1))
                    .expect("Query failed")
                    .expect("Compensation should exist");

                assert_eq!(found, created);
            }
        }
    }
}

#[test]
fn data_survives_reopening_a_database_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("orgchart.db");

    let id = {
        let db = Database::open(path.clone()).expect("Failed to open database");
        db.migrate().expect("Failed to migrate");
        db.create_employee(employee_input("John", "Lennon", &["someone"]))
            .expect("Failed to create")
            .employee_id
    };

    let db = Database::open(path).expect("Failed to reopen database");
    db.migrate().expect("Failed to migrate");
    let found = db.get_employee(&id).expect("Query failed").expect("Employee should exist");

    assert_eq!(found.first_name, "John");
    assert_eq!(stub_ids(&found), vec!["someone".to_string()]);
}
