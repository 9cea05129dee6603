use axum::{
    Extension, Json, Router,
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::modules::members::adapters::inbound::http_error::ErrorResponse;
use crate::modules::members::use_cases::get_active_member::inbound::http as get_active_http;
use crate::modules::members::use_cases::insert_member::inbound::http as insert_http;
use crate::modules::members::use_cases::list_member_history::inbound::http as history_http;
use crate::modules::members::use_cases::update_member_keep_history::inbound::http as update_http;
use crate::shell::graphql::{build_schema, graphiql, graphql};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());
    Router::new()
        .route("/members/insert", post(insert_http::handle))
        .route(
            "/members/updateMemberKeepHistory",
            post(update_http::handle),
        )
        .route(
            "/members/latestRecord/{member_id}",
            get(get_active_http::handle),
        )
        .route("/members/history/{member_id}", get(history_http::handle))
        .route("/gql", get(graphiql).post(graphql))
        .fallback(not_found)
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    warn!(path = %uri.path(), query = ?uri.query(), "no route matched");
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: format!("Not Found: {}", uri.path()),
        }),
    )
}
