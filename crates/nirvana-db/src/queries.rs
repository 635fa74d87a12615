use chrono::{SecondsFormat, Utc};
use nirvana_types::models::{Comment, JournalEntry, Post};
use rusqlite::{Connection, params};

use crate::models::{CommentRow, JournalRow, PostRow};
use crate::{Database, Result};

/// Server-side creation time, kept at full precision so reads compare
/// correctly against timestamps taken just before the write.
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl Database {
    // -- Journal --

    pub fn insert_journal_entry(&self, title: &str, content: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO journal (title, content, created_at) VALUES (?1, ?2, ?3)",
                params![title, content, now()],
            )?;
            Ok(())
        })
    }

    pub fn list_journal_entries(&self) -> Result<Vec<JournalEntry>> {
        self.with_conn(query_journal)?
            .into_iter()
            .map(JournalEntry::try_from)
            .collect()
    }

    // -- Posts --

    /// Returns the id assigned to the new post.
    pub fn insert_post(&self, author: &str, content: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (author, content, likes, created_at) VALUES (?1, ?2, 0, ?3)",
                params![author, content, now()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_posts(&self) -> Result<Vec<Post>> {
        self.with_conn(query_posts)?
            .into_iter()
            .map(Post::try_from)
            .collect()
    }

    // -- Comments --

    /// Returns the id assigned to the new comment. `post_id` is stored as
    /// given; no post has to exist under it.
    pub fn insert_comment(&self, post_id: i64, author: &str, content: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (post_id, author, content, likes, created_at)
                 VALUES (?1, ?2, ?3, 0, ?4)",
                params![post_id, author, content, now()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_comments_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.with_conn(|conn| query_comments(conn, post_id))?
            .into_iter()
            .map(Comment::try_from)
            .collect()
    }
}

fn query_journal(conn: &Connection) -> Result<Vec<JournalRow>> {
    let mut stmt =
        conn.prepare("SELECT title, content, created_at FROM journal ORDER BY rowid")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(JournalRow {
                title: row.get(0)?,
                content: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_posts(conn: &Connection) -> Result<Vec<PostRow>> {
    let mut stmt =
        conn.prepare("SELECT id, author, content, likes, created_at FROM posts ORDER BY id")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(PostRow {
                id: row.get(0)?,
                author: row.get(1)?,
                content: row.get(2)?,
                likes: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_comments(conn: &Connection, post_id: i64) -> Result<Vec<CommentRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, post_id, author, content, likes, created_at
         FROM comments
         WHERE post_id = ?1
         ORDER BY id",
    )?;

    let rows = stmt
        .query_map([post_id], |row| {
            Ok(CommentRow {
                id: row.get(0)?,
                post_id: row.get(1)?,
                author: row.get(2)?,
                content: row.get(3)?,
                likes: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn journal_entry_is_listed_after_insert() {
        let db = db();
        let before = Utc::now();
        db.insert_journal_entry("Monday", "felt calm today").unwrap();

        let entries = db.list_journal_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Monday");
        assert_eq!(entries[0].content, "felt calm today");
        assert!(entries[0].created_at >= before);
    }

    #[test]
    fn journal_keeps_insertion_order_and_duplicate_titles() {
        let db = db();
        db.insert_journal_entry("same", "first").unwrap();
        db.insert_journal_entry("same", "second").unwrap();

        let contents: Vec<_> = db
            .list_journal_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.content)
            .collect();
        assert_eq!(contents, ["first", "second"]);
    }

    #[test]
    fn empty_tables_list_nothing() {
        let db = db();
        assert!(db.list_journal_entries().unwrap().is_empty());
        assert!(db.list_posts().unwrap().is_empty());
        assert!(db.list_comments_by_post(1).unwrap().is_empty());
    }

    #[test]
    fn posts_get_unique_ids_and_zero_likes() {
        let db = db();
        let a = db.insert_post("anonymous", "hello").unwrap();
        let b = db.insert_post("anonymous", "again").unwrap();
        assert_ne!(a, b);

        let posts = db.list_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].entry.id, a);
        assert_eq!(posts[0].entry.author, "anonymous");
        assert_eq!(posts[0].entry.content, "hello");
        assert!(posts.iter().all(|p| p.entry.likes == 0));
    }

    #[test]
    fn comments_are_filtered_by_post() {
        let db = db();
        let post = db.insert_post("anonymous", "topic").unwrap();
        let other = db.insert_post("anonymous", "other topic").unwrap();
        let id = db.insert_comment(post, "anonymous", "nice").unwrap();

        let comments = db.list_comments_by_post(post).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].entry.id, id);
        assert_eq!(comments[0].post_id, post);
        assert_eq!(comments[0].entry.content, "nice");
        assert_eq!(comments[0].entry.likes, 0);

        assert!(db.list_comments_by_post(other).unwrap().is_empty());
    }

    #[test]
    fn comment_on_missing_post_is_accepted() {
        let db = db();
        db.insert_comment(404, "anonymous", "orphan").unwrap();
        assert_eq!(db.list_comments_by_post(404).unwrap().len(), 1);
    }

    #[test]
    fn unparseable_timestamp_is_a_malformed_row() {
        let db = db();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO journal (title, content, created_at) VALUES ('t', 'c', 'yesterday')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let err = db.list_journal_entries().unwrap_err();
        assert!(matches!(err, StorageError::MalformedRow(_)));
    }

    #[test]
    fn missing_table_surfaces_as_sqlite_error() {
        let db = db();
        db.with_conn(|conn| {
            conn.execute_batch("DROP TABLE posts")?;
            Ok(())
        })
        .unwrap();

        assert!(matches!(
            db.insert_post("anonymous", "lost"),
            Err(StorageError::Sqlite(_))
        ));
    }

    #[test]
    fn migrations_are_idempotent() {
        let db = db();
        db.insert_post("anonymous", "kept").unwrap();
        db.with_conn(|conn| crate::migrations::run(conn)).unwrap();
        assert_eq!(db.list_posts().unwrap().len(), 1);
    }
}
