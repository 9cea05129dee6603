use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::modules::members::adapters::inbound::http_error::error_response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    match state.members.history_by_record_id(&member_id).await {
        Ok(history) => Json(history).into_response(),
        Err(error) => error_response(error),
    }
}
