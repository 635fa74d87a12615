use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use tracing::info;

use nirvana_types::api::JournalRequest;

use crate::error::ApiError;
use crate::state::{AppState, with_db};

/// POST /emotion-analysis stores the entry, then returns the top emotion
/// labels for its text. The entry stays stored if classification fails.
pub async fn submit_entry(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<JournalRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let JournalRequest { title, body } = req;

    let content = body.clone();
    with_db(&state, move |db| db.insert_journal_entry(&title, &content)).await?;

    let scores = state.classifier.classify(&body).await?;
    info!("Journal entry stored and classified ({} labels)", scores.len());

    Ok(Json(scores))
}

/// GET /entries
pub async fn list_entries(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let entries = with_db(&state, |db| db.list_journal_entries()).await?;
    Ok(Json(entries))
}
