//! Lookup-by-id access to employees.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use crate::models::Employee;

/// Read access to stored employees.
///
/// `fetch` must be a plain lookup: no side effects the resolver could observe,
/// and safe to call from several threads with different ids. Returned
/// employees carry their direct reports as stubs.
pub trait EmployeeStore {
    /// Look up an employee. `Ok(None)` means the id is unknown; `Err` is
    /// reserved for failures of the store itself.
    fn fetch(&self, employee_id: &str) -> Result<Option<Employee>>;
}

impl<S: EmployeeStore + ?Sized> EmployeeStore for &S {
    fn fetch(&self, employee_id: &str) -> Result<Option<Employee>> {
        (**self).fetch(employee_id)
    }
}

impl<S: EmployeeStore + ?Sized> EmployeeStore for Arc<S> {
    fn fetch(&self, employee_id: &str) -> Result<Option<Employee>> {
        (**self).fetch(employee_id)
    }
}

/// In-memory store keyed by employee id.
impl EmployeeStore for HashMap<String, Employee> {
    fn fetch(&self, employee_id: &str) -> Result<Option<Employee>> {
        Ok(self.get(employee_id).cloned())
    }
}
