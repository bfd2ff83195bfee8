use serde::{Deserialize, Serialize};

use super::Employee;

/// An employee paired with the number of people below them.
///
/// `number_of_reports` counts direct-report edges walked depth-first, so an
/// employee reachable through two managers is counted once per manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructure {
    pub employee: Employee,
    pub number_of_reports: usize,
}
