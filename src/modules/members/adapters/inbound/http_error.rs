use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::modules::members::store::errors::MemberStoreError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

pub fn status_for(error: &MemberStoreError) -> StatusCode {
    match error {
        MemberStoreError::Validation(_) => StatusCode::BAD_REQUEST,
        MemberStoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        MemberStoreError::WriteConflict(_) => StatusCode::CONFLICT,
        MemberStoreError::TransactionFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        MemberStoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(error: MemberStoreError) -> axum::response::Response {
    let status = status_for(&error);
    let message = match &error {
        MemberStoreError::NotFound { .. } => format!("Resource not found: {error}"),
        MemberStoreError::Unexpected(_) => "An unexpected error occurred".to_string(),
        _ => error.to_string(),
    };
    (status, Json(ErrorResponse { message })).into_response()
}

pub fn rejection_response(rejection: JsonRejection) -> axum::response::Response {
    warn!(error = %rejection.body_text(), "bad request");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            message: format!("Invalid request: {}", rejection.body_text()),
        }),
    )
        .into_response()
}
