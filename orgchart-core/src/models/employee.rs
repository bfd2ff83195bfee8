use serde::{Deserialize, Serialize};

/// A member of the organization.
///
/// The `employee_id` is assigned once on creation and never changes. The
/// `direct_reports` list is what turns employees into a graph: as stored, every
/// entry is a [`DirectReport::Stub`] carrying only an id. The hierarchy resolver
/// can rewrite the list into [`DirectReport::Resolved`] nodes, or drop it
/// entirely (`None`) when the caller did not ask for details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_reports: Option<Vec<DirectReport>>,
}

impl Employee {
    /// Display name in "First Last" form.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Ids of the direct reports, in list order.
    pub fn direct_report_ids(&self) -> impl Iterator<Item = &str> {
        self.direct_reports
            .iter()
            .flatten()
            .map(DirectReport::employee_id)
    }

    pub fn has_direct_reports(&self) -> bool {
        self.direct_reports
            .as_ref()
            .is_some_and(|reports| !reports.is_empty())
    }
}

/// A reference to an employee that only carries the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    pub employee_id: String,
}

impl EmployeeRef {
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
        }
    }
}

/// One entry of an employee's direct-report list.
///
/// Both shapes serialize as a JSON object with an `employeeId` key, so a client
/// can always read the id without knowing whether details were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DirectReport {
    /// Fully populated employee, possibly with its own resolved reports.
    Resolved(Box<Employee>),
    /// Id only, not yet looked up.
    Stub(EmployeeRef),
}

impl DirectReport {
    pub fn stub(employee_id: impl Into<String>) -> Self {
        Self::Stub(EmployeeRef::new(employee_id))
    }

    pub fn employee_id(&self) -> &str {
        match self {
            Self::Resolved(employee) => &employee.employee_id,
            Self::Stub(reference) => &reference.employee_id,
        }
    }

    pub fn as_resolved(&self) -> Option<&Employee> {
        match self {
            Self::Resolved(employee) => Some(employee),
            Self::Stub(_) => None,
        }
    }
}

/// Input for creating or replacing an employee.
///
/// Updates are full replacements: every field, including the direct-report
/// list, overwrites the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub direct_reports: Vec<EmployeeRef>,
}
