use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A salary effective from a given date.
///
/// An employee has at most one compensation per effective date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    pub compensation_id: String,
    pub employee_id: String,
    pub salary: f64,
    /// Serialized as `yyyy-MM-dd`.
    pub effective_date: NaiveDate,
}

/// Input for recording a new compensation.
///
/// The date stays a string until validated so a malformed value can be
/// reported alongside the other field errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationInput {
    pub salary: Option<f64>,
    #[serde(default)]
    pub effective_date: String,
}
