//! JSON envelope shared by every API response.
//!
//! Success: `{status:"success", code, message, timestamp, data}`.
//! Error:   `{status:"error", code, message, timestamp, details?, errors?}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use innomed_common::InnomedError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub status: &'static str,
    pub code: u16,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl Envelope {
    pub fn success(data: Value, message: impl Into<String>) -> Self {
        Self {
            status: "success",
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            timestamp: Utc::now(),
            data: Some(data),
            details: None,
            errors: None,
        }
    }

    pub fn error(code: StatusCode, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status: "error",
            code: code.as_u16(),
            message: message.into(),
            timestamp: Utc::now(),
            data: None,
            details,
            errors: None,
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::error(StatusCode::BAD_REQUEST, "Validation failed", None)
        }
    }
}

/// 200 response carrying `data`.
pub struct ApiResponse(pub Envelope);

impl ApiResponse {
    pub fn ok<T: Serialize>(data: &T, message: impl Into<String>) -> Result<Self, ApiError> {
        let value = serde_json::to_value(data).map_err(InnomedError::from)?;
        Ok(Self(Envelope::success(value, message)))
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] InnomedError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(InnomedError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Internal(InnomedError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            ApiError::Validation(errors)
            | ApiError::Internal(InnomedError::Validation(errors)) => Envelope::validation(errors.clone()),
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => {
                Envelope::error(self.status(), msg.clone(), None)
            }
            ApiError::Internal(InnomedError::NotFound(what)) => {
                Envelope::error(self.status(), format!("{what} not found"), None)
            }
            ApiError::Internal(e) => {
                Envelope::error(self.status(), "Internal server error", Some(e.to_string()))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref e) = self {
            if e.is_pipeline_failure() {
                error!(error = %e, "Query pipeline failed");
            }
        }
        (self.status(), Json(self.envelope())).into_response()
    }
}
