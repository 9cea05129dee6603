use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
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
    info!(member_id = %candidate.member_id, "received request to update member");

    match state.members.update_keep_history(candidate).await {
        Ok(history) => Json(history).into_response(),
        Err(error) => error_response(error),
    }
}
