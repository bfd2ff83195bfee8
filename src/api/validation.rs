//! Request validation.
//!
//! Field problems are collected and reported together, joined with `", "`.

use chrono::NaiveDate;
use uuid::Uuid;

use super::error::ApiError;
use crate::models::{CompensationInput, EmployeeInput};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn is_valid_uuid(value: &str) -> bool {
    !value.trim().is_empty() && Uuid::parse_str(value).is_ok()
}

/// Parse a strict `yyyy-MM-dd` date. Rejects unpadded fields like `2024-1-5`.
pub fn parse_local_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == value).then_some(date)
}

/// Parse a boolean query flag. Accepts `true/false`, `on/off`, `yes/no` and
/// `1/0` in any case; a blank value falls back to `default`.
pub fn parse_flag(name: &str, value: Option<&str>, default: bool) -> Result<bool, ApiError> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(value) => value.to_ascii_lowercase(),
    };

    match value.as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ApiError::Validation(format!(
            "{} must be a boolean value",
            name
        ))),
    }
}

pub fn require_uuid(value: &str, message: &str) -> Result<(), ApiError> {
    if is_valid_uuid(value) {
        Ok(())
    } else {
        Err(ApiError::Validation(message.to_string()))
    }
}

pub fn require_local_date(value: &str, message: &str) -> Result<NaiveDate, ApiError> {
    parse_local_date(value).ok_or_else(|| ApiError::Validation(message.to_string()))
}

pub fn validate_employee(input: &EmployeeInput) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    let required = [
        (&input.first_name, "First name is required"),
        (&input.last_name, "Last name is required"),
        (&input.position, "Position is required"),
        (&input.department, "Department is required"),
    ];
    for (value, message) in required {
        if value.trim().is_empty() {
            errors.push(message.to_string());
        }
    }

    for report in &input.direct_reports {
        if !is_valid_uuid(&report.employee_id) {
            errors.push(format!(
                "Direct report ID must be a valid UUID: {}",
                report.employee_id
            ));
        }
    }

    into_result(errors)
}

/// Validate a compensation request and return its salary and effective date.
pub fn validate_compensation(input: &CompensationInput) -> Result<(f64, NaiveDate), ApiError> {
    let mut errors = Vec::new();

    let effective_date = parse_local_date(&input.effective_date);
    if effective_date.is_none() {
        errors.push(
            "Effective date must be a valid local date in yyyy-MM-dd format".to_string(),
        );
    }

    match input.salary {
        None => errors.push("Salary must not be null.".to_string()),
        Some(salary) if !salary.is_finite() || salary < 0.0 => {
            errors.push("Salary must be zero or a positive value.".to_string())
        }
        Some(_) => {}
    }

    into_result(errors)?;

    match (input.salary, effective_date) {
        (Some(salary), Some(date)) => Ok((salary, date)),
        _ => Err(ApiError::Validation("Invalid compensation".to_string())),
    }
}

fn into_result(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors.join(", ")))
    }
}
