pub mod error;
pub mod forum;
pub mod journal;
pub mod state;

use axum::{Json, Router, routing::get, routing::post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use nirvana_types::api::HealthResponse;

pub use error::ApiError;
pub use state::{AppState, AppStateInner};

/// Full route table with CORS and request tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/emotion-analysis", post(journal::submit_entry))
        .route("/entries", get(journal::list_entries))
        .route("/forum/posts", get(forum::list_posts).post(forum::submit_post))
        .route(
            "/forum/comments/{post_id}",
            get(forum::list_comments).post(forum::submit_comment),
        )
        .route("/health", get(health))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
