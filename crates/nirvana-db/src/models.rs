//! Database row types. Timestamps stay as stored text until converted into
//! the entity types from `nirvana-types`.

use chrono::{DateTime, Utc};
use nirvana_types::models::{Comment, ForumEntry, JournalEntry, Post};

use crate::{Result, StorageError};

pub struct JournalRow {
    pub title: String,
    pub content: String,
    pub created_at: String,
}

pub struct PostRow {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub likes: i64,
    pub created_at: String,
}

pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub content: String,
    pub likes: i64,
    pub created_at: String,
}

fn parse_timestamp(raw: &str, table: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::MalformedRow(format!("{table}.created_at '{raw}': {e}")))
}

impl TryFrom<JournalRow> for JournalEntry {
    type Error = StorageError;

    fn try_from(row: JournalRow) -> Result<Self> {
        Ok(JournalEntry {
            created_at: parse_timestamp(&row.created_at, "journal")?,
            title: row.title,
            content: row.content,
        })
    }
}

impl TryFrom<PostRow> for Post {
    type Error = StorageError;

    fn try_from(row: PostRow) -> Result<Self> {
        Ok(Post {
            entry: ForumEntry {
                created_at: parse_timestamp(&row.created_at, "posts")?,
                id: row.id,
                author: row.author,
                content: row.content,
                likes: row.likes,
            },
        })
    }
}

impl TryFrom<CommentRow> for Comment {
    type Error = StorageError;

    fn try_from(row: CommentRow) -> Result<Self> {
        Ok(Comment {
            post_id: row.post_id,
            entry: ForumEntry {
                created_at: parse_timestamp(&row.created_at, "comments")?,
                id: row.id,
                author: row.author,
                content: row.content,
                likes: row.likes,
            },
        })
    }
}
