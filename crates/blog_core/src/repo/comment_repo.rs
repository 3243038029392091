//! Comment repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `comments` table.
//! - Provide the indexed `post_id` lookups used by listing and embedding.
//!
//! # Invariants
//! - `post_id` references an existing post (`foreign_keys=ON`); inserting a
//!   comment for a missing post fails with `RepoError::Db`.
//! - Lists are ordered by `id ASC`.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::comment::{Comment, CommentId, CommentInput};
use crate::model::post::PostId;
use log::debug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const COMMENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    body,
    post_id
FROM comments";

/// Repository interface for comment operations.
pub trait CommentRepository {
    /// Inserts one comment under `post_id` and returns it with the generated id.
    fn create_comment(&self, post_id: PostId, input: &CommentInput) -> RepoResult<Comment>;
    /// Loads one comment by id regardless of its parent.
    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    /// Lists comments of one post.
    fn list_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;
    /// Lists comments of several posts in one query.
    fn list_by_post_ids(&self, post_ids: &[PostId]) -> RepoResult<Vec<Comment>>;
    /// Overwrites name/email/body of one comment.
    fn update_comment(&self, id: CommentId, input: &CommentInput) -> RepoResult<Comment>;
    /// Deletes one comment.
    fn delete_comment(&self, id: CommentId) -> RepoResult<()>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "comments")?;
        Ok(Self { conn })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn create_comment(&self, post_id: PostId, input: &CommentInput) -> RepoResult<Comment> {
        self.conn.execute(
            "INSERT INTO comments (name, email, body, post_id) VALUES (?1, ?2, ?3, ?4);",
            params![input.name, input.email, input.body, post_id],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=comment_insert module=repo status=ok comment_id={id} post_id={post_id}");

        Ok(Comment {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            body: input.body.clone(),
            post_id,
        })
    }

    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let comment = self
            .conn
            .query_row(
                &format!("{COMMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_comment_row,
            )
            .optional()?;
        Ok(comment)
    }

    fn list_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        self.list_by_post_ids(&[post_id])
    }

    fn list_by_post_ids(&self, post_ids: &[PostId]) -> RepoResult<Vec<Comment>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; post_ids.len()].join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL}
             WHERE post_id IN ({placeholders})
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query(params_from_iter(post_ids.iter()))?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }
        Ok(comments)
    }

    fn update_comment(&self, id: CommentId, input: &CommentInput) -> RepoResult<Comment> {
        let changed = self.conn.execute(
            "UPDATE comments
             SET
                name = ?2,
                email = ?3,
                body = ?4
             WHERE id = ?1;",
            params![id, input.name, input.email, input.body],
        )?;

        if changed == 0 {
            return Err(RepoError::CommentNotFound(id));
        }

        self.get_comment(id)?
            .ok_or(RepoError::CommentNotFound(id))
    }

    fn delete_comment(&self, id: CommentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::CommentNotFound(id));
        }
        Ok(())
    }
}

fn parse_comment_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        body: row.get("body")?,
        post_id: row.get("post_id")?,
    })
}
