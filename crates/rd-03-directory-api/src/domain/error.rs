//! Directory service errors and their HTTP mapping.
//!
//! Rejections (malformed input, broken chain, conflict) are 400 with the
//! reason verbatim. Store faults are 500 with a fixed message; the cause
//! only goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rd_01_entry_validation::ValidationError;
use rd_02_record_store::{AdmitError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Request body is not a JSON entry.
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    /// Entry failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A newer record already exists for the pair.
    #[error("Newer entry already exists")]
    Conflict,

    /// The admission unit could not be applied.
    #[error("Failed to update database")]
    UpdateFailed(#[source] StoreError),

    /// The sibling query could not be completed.
    #[error("Failed to query database")]
    QueryFailed(#[source] StoreError),
}

impl DirectoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DirectoryError::MalformedBody(_)
            | DirectoryError::Invalid(_)
            | DirectoryError::Conflict => StatusCode::BAD_REQUEST,
            DirectoryError::UpdateFailed(_) | DirectoryError::QueryFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AdmitError> for DirectoryError {
    fn from(err: AdmitError) -> Self {
        match err {
            AdmitError::NewerEntryExists => DirectoryError::Conflict,
            AdmitError::Store(e) => DirectoryError::UpdateFailed(e),
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
