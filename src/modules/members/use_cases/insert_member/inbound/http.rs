use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::modules::members::adapters::inbound::http_error::{error_response, rejection_response};
use crate::modules::members::core::member::MemberCandidate;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<MemberCandidate>, JsonRejection>,
) -> impl IntoResponse {
    let Json(candidate) = match body {
        Ok(b) => b,
        Err(rejection) => return rejection_response(rejection),
    };
    info!(member_id = %candidate.member_id, "received request to insert member");

    match state.members.insert(candidate).await {
        Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}
