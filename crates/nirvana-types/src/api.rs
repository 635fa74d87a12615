use serde::{Deserialize, Serialize};

// -- Journal --

/// Body of `POST /emotion-analysis`. The entry text arrives as `body` and is
/// stored as the entry's `content`.
#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    pub title: String,
    pub body: String,
}

/// One ranked label from the emotion classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

// -- Forum --

/// Body of `POST /forum/posts` and `POST /forum/comments/{post_id}`.
#[derive(Debug, Deserialize)]
pub struct ForumRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

// -- Misc --

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
