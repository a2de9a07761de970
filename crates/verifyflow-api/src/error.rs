//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every error renders as a flat JSON object whose `error` field carries a
//! fixed, human-readable summary. Extra fields (`required`, `missing`, `id`,
//! `message`) appear only for the variants that need them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use verifyflow_checks::ProviderError;
use verifyflow_core::{ValidationError, REQUIRED_FIELDS};

use crate::store::StoreError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Summary, e.g. "Missing required fields" or "Case not found".
    pub error: String,
    /// Underlying failure description (400 malformed body, 500).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The requested case id (404).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The full list of required intake fields (400 validation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// The required intake fields that were absent or blank (400 validation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

impl ErrorBody {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            message: None,
            id: None,
            required: None,
            missing: None,
        }
    }
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more required intake fields were absent or blank (400).
    #[error(transparent)]
    MissingFields(#[from] ValidationError),

    /// Request body could not be parsed (400).
    #[error("invalid request body: {0}")]
    BadRequest(String),

    /// Case detail requested without an id (400).
    #[error("case id is required")]
    MissingCaseId,

    /// No case with this id (404).
    #[error("case not found: {id}")]
    CaseNotFound { id: String },

    /// No route matches the path (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Route exists but not for this method (405).
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Store, provider or other unexpected failure (500).
    ///
    /// The message is returned to the caller verbatim and logged.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::BadRequest(_) | Self::MissingCaseId => {
                StatusCode::BAD_REQUEST
            }
            Self::CaseNotFound { .. } | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::MissingFields(err) => ErrorBody {
                required: Some(REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect()),
                missing: Some(err.missing_fields.iter().map(|f| f.to_string()).collect()),
                ..ErrorBody::new("Missing required fields")
            },
            Self::BadRequest(message) => ErrorBody {
                message: Some(message.clone()),
                ..ErrorBody::new("Invalid request body")
            },
            Self::MissingCaseId => ErrorBody::new("Case ID is required"),
            Self::CaseNotFound { id } => ErrorBody {
                id: Some(id.clone()),
                ..ErrorBody::new("Case not found")
            },
            Self::NotFound(_) => ErrorBody::new("Not found"),
            Self::MethodNotAllowed => ErrorBody::new("Method not allowed"),
            Self::Internal(message) => ErrorBody {
                message: Some(message.clone()),
                ..ErrorBody::new("Internal server error")
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(message) = &self {
            tracing::error!(error = %message, "internal server error");
        }
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use verifyflow_core::CheckType;

    async fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[test]
    fn status_codes() {
        let missing = ValidationError {
            missing_fields: vec!["country"],
        };
        assert_eq!(AppError::from(missing).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MissingCaseId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::CaseNotFound { id: "KYC-9".into() }.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::NotFound("/x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn missing_fields_body_lists_required_and_missing() {
        let err = AppError::from(ValidationError {
            missing_fields: vec!["lastName", "idNumber"],
        });
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(
            body["required"],
            serde_json::json!(["firstName", "lastName", "dateOfBirth", "country", "idNumber"])
        );
        assert_eq!(body["missing"], serde_json::json!(["lastName", "idNumber"]));
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn case_not_found_echoes_id() {
        let (status, body) =
            response_parts(AppError::CaseNotFound { id: "UNKNOWN-ID".into() }).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({"error": "Case not found", "id": "UNKNOWN-ID"})
        );
    }

    #[tokio::test]
    async fn internal_surfaces_message() {
        let (status, body) = response_parts(AppError::Internal("pool closed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "pool closed");
    }

    #[tokio::test]
    async fn fixed_bodies() {
        let (_, body) = response_parts(AppError::MissingCaseId).await;
        assert_eq!(body, serde_json::json!({"error": "Case ID is required"}));
        let (_, body) = response_parts(AppError::MethodNotAllowed).await;
        assert_eq!(body, serde_json::json!({"error": "Method not allowed"}));
        let (_, body) = response_parts(AppError::NotFound("/nope".into())).await;
        assert_eq!(body, serde_json::json!({"error": "Not found"}));
        let (_, body) = response_parts(AppError::BadRequest("expected value".into())).await;
        assert_eq!(body["error"], "Invalid request body");
        assert_eq!(body["message"], "expected value");
    }

    #[test]
    fn provider_and_store_errors_become_internal() {
        let err = AppError::from(ProviderError::Unavailable {
            provider: "LiveSanctions".into(),
            reason: "timeout".into(),
        });
        assert!(matches!(&err, AppError::Internal(m) if m.contains("timeout")));

        let err = AppError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert!(matches!(&err, AppError::Internal(m) if m.starts_with("database error")));

        let err = AppError::from(ProviderError::UnexpectedOutcome {
            check_type: CheckType::Pep,
            status: verifyflow_core::CheckStatus::Flagged,
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
