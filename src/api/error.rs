//! Error responses for the HTTP API.
//!
//! Every failure is returned as an [`ErrorDetails`] JSON body. Client errors
//! carry their message; server-side failures are logged in full and answered
//! with a generic message so graph internals and database details stay private.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DuplicateEntity;
use orgchart_core::HierarchyError;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub status: u16,
    pub message: String,
    pub errors: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    CircularReference(String),

    #[error(transparent)]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DuplicateEntity>() {
            Ok(duplicate) => Self::Duplicate(duplicate.0),
            Err(err) => Self::Internal(err),
        }
    }
}

impl From<HierarchyError> for ApiError {
    fn from(err: HierarchyError) -> Self {
        match err {
            HierarchyError::NotFound(_) => Self::NotFound(err.to_string()),
            HierarchyError::CircularReference(_) => Self::CircularReference(err.to_string()),
            HierarchyError::Store(err) => Self::Internal(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl ApiError {
    fn details(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, "Validation error", msg.clone()),
            Self::Duplicate(msg) => (
                StatusCode::BAD_REQUEST,
                "Unique constraint violation",
                msg.clone(),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "Resource not found", msg.clone()),
            Self::CircularReference(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred",
                "An unexpected error occurred while processing the request".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred",
                "Internal server error".to_string(),
            ),
        }
    }

    fn log(&self) {
        match self {
            Self::Validation(msg) | Self::Duplicate(msg) | Self::NotFound(msg) => {
                tracing::warn!("Request rejected: {}", msg);
            }
            Self::CircularReference(msg) => {
                tracing::error!("Circular reference in reporting structure: {}", msg);
            }
            Self::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let (status, message, errors) = self.details();
        let body = ErrorDetails {
            status: status.as_u16(),
            message: message.to_string(),
            errors,
        };

        (status, Json(body)).into_response()
    }
}
