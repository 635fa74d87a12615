use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A private journal entry. Entries carry no identifier; they are read back
/// in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields shared by every forum submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumEntry {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

/// Top-level forum submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub entry: ForumEntry,
}

/// Reply attached to a post. `post_id` is not checked against existing posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub post_id: i64,
    #[serde(flatten)]
    pub entry: ForumEntry,
}
