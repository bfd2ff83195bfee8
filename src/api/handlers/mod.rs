use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::error::ApiError;
use super::validation;
use crate::db::Database;
use crate::models::*;
use orgchart_core::HierarchyResolver;

const INVALID_EMPLOYEE_ID: &str = "Employee ID must be a valid UUID";
const INVALID_EFFECTIVE_DATE: &str = "Effective date must be in yyyy-MM-dd format";

fn employee_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Employee not found for employeeId: {}", id))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Employees
// ============================================================

pub async fn list_employees(State(db): State<Database>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(db.list_employees()?))
}

pub async fn create_employee(
    State(db): State<Database>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(input) = payload?;
    tracing::debug!(?input, "Received employee create request");

    validation::validate_employee(&input)?;
    let employee = db.create_employee(input)?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn get_employee(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    tracing::debug!(employee_id = %id, "Received employee read request");

    db.get_employee(&id)?
        .map(Json)
        .ok_or_else(|| employee_not_found(&id))
}

pub async fn update_employee(
    State(db): State<Database>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(input) = payload?;
    tracing::debug!(employee_id = %id, ?input, "Received employee update request");

    validation::validate_employee(&input)?;
    db.update_employee(&id, input)?
        .map(Json)
        .ok_or_else(|| employee_not_found(&id))
}

/// Query parameters for the reporting structure.
///
/// The flag is kept as text so that a blank value falls back to the default
/// and a bad one is reported as a validation error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructureQuery {
    /// Replace direct-report stubs with full employees at every level.
    pub include_direct_report_details: Option<String>,
}

/// Count everyone below an employee and optionally return the full hierarchy.
///
/// Resolution does one blocking store lookup per employee, so it runs off the
/// async executor.
pub async fn get_reporting_structure(
    State(db): State<Database>,
    Path(id): Path<String>,
    query: Result<Query<ReportingStructureQuery>, QueryRejection>,
) -> Result<Json<ReportingStructure>, ApiError> {
    let Query(query) = query?;
    let include_details = validation::parse_flag(
        "includeDirectReportDetails",
        query.include_direct_report_details.as_deref(),
        false,
    )?;
    tracing::debug!(
        employee_id = %id,
        include_details,
        "Received reporting structure request"
    );

    let structure = tokio::task::spawn_blocking(move || {
        HierarchyResolver::new(db).resolve(&id, include_details)
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))??;

    Ok(Json(structure))
}

// ============================================================
// Compensation
// ============================================================

pub async fn list_compensations(
    State(db): State<Database>,
    Path(employee_id): Path<String>,
) -> Result<Json<Vec<Compensation>>, ApiError> {
    tracing::debug!(%employee_id, "Received compensation list request");

    validation::require_uuid(&employee_id, INVALID_EMPLOYEE_ID)?;
    Ok(Json(db.get_compensations(&employee_id)?))
}

pub async fn get_compensation(
    State(db): State<Database>,
    Path((employee_id, effective_date)): Path<(String, String)>,
) -> Result<Json<Compensation>, ApiError> {
    tracing::debug!(%employee_id, %effective_date, "Received compensation read request");

    validation::require_uuid(&employee_id, INVALID_EMPLOYEE_ID)?;
    let date = validation::require_local_date(&effective_date, INVALID_EFFECTIVE_DATE)?;

    db.get_compensation(&employee_id, date)?
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Compensation not found for employeeId: {} and effectiveDate: {}",
                employee_id, date
            ))
        })
}

pub async fn create_compensation(
    State(db): State<Database>,
    Path(employee_id): Path<String>,
    payload: Result<Json<CompensationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Compensation>), ApiError> {
    let Json(input) = payload?;
    tracing::debug!(%employee_id, ?input, "Received compensation create request");

    validation::require_uuid(&employee_id, INVALID_EMPLOYEE_ID)?;
    let (salary, effective_date) = validation::validate_compensation(&input)?;

    let compensation = db.create_compensation(&employee_id, salary, effective_date)?;
    Ok((StatusCode::CREATED, Json(compensation)))
}
