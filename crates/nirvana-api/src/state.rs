use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use nirvana_classifier::ClassifierClient;
use nirvana_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub classifier: ClassifierClient,
    /// Author recorded on every post and comment.
    pub author: String,
    /// Upper bound on a single storage round-trip.
    pub db_timeout: Duration,
}

impl AppStateInner {
    pub fn new(
        db: Database,
        classifier: ClassifierClient,
        author: String,
        db_timeout: Duration,
    ) -> AppState {
        Arc::new(Self {
            db,
            classifier,
            author,
            db_timeout,
        })
    }
}

/// Run a storage call off the async runtime, bounded by `db_timeout`.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> nirvana_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let st = state.clone();
    let task = tokio::task::spawn_blocking(move || f(&st.db));

    match tokio::time::timeout(state.db_timeout, task).await {
        Ok(Ok(result)) => result.map_err(ApiError::Storage),
        Ok(Err(e)) => {
            error!("spawn_blocking join error: {}", e);
            Err(ApiError::TaskFailed(e.to_string()))
        }
        Err(_) => Err(ApiError::StorageTimeout(state.db_timeout)),
    }
}
