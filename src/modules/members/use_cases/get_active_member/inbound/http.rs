use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::info;

use crate::modules::members::adapters::inbound::http_error::error_response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    info!(member_id = %member_id, "received request to get member");
    match state.members.get_active_by_record_id(&member_id).await {
        Ok(active) => Json(active).into_response(),
        Err(error) => error_response(error),
    }
}

#[cfg(test)]
mod get_active_member_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::shell::state::AppState;
    use crate::tests::fixtures::members::candidate;
    use crate::tests::fixtures::state::make_test_state;

    use super::handle;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/members/latestRecord/{member_id}", get(handle))
            .with_state(state)
    }

    #[tokio::test]
    async fn it_should_return_the_active_version() {
        let state = make_test_state();
        state.members.insert(candidate("M1", "Alice")).await.unwrap();
        state
            .members
            .update_keep_history(candidate("M1", "Alice B."))
            .await
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::get("/members/latestRecord/M1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["version"], 2);
        assert_eq!(json["firstName"], "Alice B.");
    }

    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_member() {
        let response = app(make_test_state())
            .oneshot(
                Request::get("/members/latestRecord/M2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json["message"],
            "Resource not found: No member found with ID: M2"
        );
    }
}
