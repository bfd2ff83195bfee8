//! HTTP client for the OrgChart API.
//!
//! Used by the CLI to query a running server. Configuration is via environment
//! variables:
//! - `ORGCHART_URL` - Base URL (default: `http://localhost:3000/api/v1`)

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::ErrorDetails;
use crate::models::*;

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:3000/api/v1";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// HTTP client for the OrgChart API.
#[derive(Debug, Clone)]
pub struct OrgChartClient {
    base_url: String,
    client: Client,
}

impl OrgChartClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("ORGCHART_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/employees/{id}/{rest..}`, with the id escaped as a single path segment.
    fn employee_url(&self, id: &str, rest: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("employees")
            .push(id)
            .extend(rest);
        Ok(url)
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(message)),
            _ => Err(ClientError::Server(format!("{}: {}", status, message))),
        }
    }

    // ============================================================
    // Employee Operations
    // ============================================================

    pub async fn get_employee(&self, id: &str) -> Result<Employee, ClientError> {
        let response = self
            .client
            .get(self.employee_url(id, &[])?)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn get_reporting_structure(
        &self,
        id: &str,
        include_details: bool,
    ) -> Result<ReportingStructure, ClientError> {
        let response = self
            .client
            .get(self.employee_url(id, &["reporting-structure"])?)
            .query(&[("includeDirectReportDetails", include_details)])
            .send()
            .await?;
        self.handle_response(response).await
    }
}

/// Pull the detail out of an [`ErrorDetails`] body, falling back to the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorDetails>(body) {
        Ok(details) => format!("{} ({})", details.errors, details.message),
        Err(_) => body.to_string(),
    }
}
