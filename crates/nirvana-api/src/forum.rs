use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use nirvana_types::api::{CreatedResponse, ForumRequest};

use crate::error::ApiError;
use crate::state::{AppState, with_db};

pub async fn submit_post(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<ForumRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let author = state.author.clone();
    let id = with_db(&state, move |db| db.insert_post(&author, &req.content)).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = with_db(&state, |db| db.list_posts()).await?;
    Ok(Json(posts))
}

/// POST /forum/comments/{post_id}. The post is not required to exist.
pub async fn submit_comment(
    State(state): State<AppState>,
    WithRejection(Path(post_id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(req), _): WithRejection<Json<ForumRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let author = state.author.clone();
    let id = with_db(&state, move |db| {
        db.insert_comment(post_id, &author, &req.content)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn list_comments(
    State(state): State<AppState>,
    WithRejection(Path(post_id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = with_db(&state, move |db| db.list_comments_by_post(post_id)).await?;
    Ok(Json(comments))
}
