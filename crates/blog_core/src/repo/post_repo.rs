//! Post repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and paged listing over the `posts` table.
//! - Own the post-delete cascade onto `comments`.
//!
//! # Invariants
//! - Title uniqueness is left to the `UNIQUE` constraint; violations surface
//!   as `RepoError::Db`.
//! - Listing order is `<sort column> <direction>, id ASC`.
//! - Deleting a post removes its comments in the same immediate transaction.

use super::{count_to_u64, ensure_connection_ready, RepoError, RepoResult};
use crate::model::page::PageRequest;
use crate::model::post::{Post, PostId, PostInput};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    content
FROM posts";

/// Repository interface for post operations.
pub trait PostRepository {
    /// Inserts one post and returns it with the generated id.
    fn create_post(&self, input: &PostInput) -> RepoResult<Post>;
    /// Loads one post by id.
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    /// Loads one page of posts in the requested order.
    fn list_posts(&self, request: &PageRequest) -> RepoResult<Vec<Post>>;
    /// Counts all posts.
    fn count_posts(&self) -> RepoResult<u64>;
    /// Overwrites title/description/content of one post.
    fn update_post(&self, id: PostId, input: &PostInput) -> RepoResult<Post>;
    /// Deletes one post and all of its comments; returns removed comment count.
    fn delete_post(&self, id: PostId) -> RepoResult<usize>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "posts")?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, input: &PostInput) -> RepoResult<Post> {
        self.conn.execute(
            "INSERT INTO posts (title, description, content) VALUES (?1, ?2, ?3);",
            params![input.title, input.description, input.content],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=post_insert module=repo status=ok post_id={id}");

        Ok(Post {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            content: input.content.clone(),
        })
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let post = self
            .conn
            .query_row(
                &format!("{POST_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_post_row,
            )
            .optional()?;
        Ok(post)
    }

    fn list_posts(&self, request: &PageRequest) -> RepoResult<Vec<Post>> {
        let offset = i64::try_from(request.offset()).map_err(|_| {
            RepoError::InvalidData(format!("page offset {} is out of range", request.offset()))
        })?;
        let mut stmt = self.conn.prepare(&format!(
            "{POST_SELECT_SQL}
             ORDER BY {} {}, id ASC
             LIMIT ?1 OFFSET ?2;",
            request.sort_field.column(),
            request.direction.as_sql()
        ))?;

        let mut rows = stmt.query(params![i64::from(request.page_size()), offset])?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }
        Ok(posts)
    }

    fn count_posts(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM posts;", [], |row| row.get(0))?;
        count_to_u64(count, "posts")
    }

    fn update_post(&self, id: PostId, input: &PostInput) -> RepoResult<Post> {
        let changed = self.conn.execute(
            "UPDATE posts
             SET
                title = ?2,
                description = ?3,
                content = ?4
             WHERE id = ?1;",
            params![id, input.title, input.description, input.content],
        )?;

        if changed == 0 {
            return Err(RepoError::PostNotFound(id));
        }

        Ok(Post {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            content: input.content.clone(),
        })
    }

    fn delete_post(&self, id: PostId) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let removed_comments = tx.execute("DELETE FROM comments WHERE post_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM posts WHERE id = ?1;", [id])?;
        if changed == 0 {
            // Dropping `tx` rolls back the comment delete.
            return Err(RepoError::PostNotFound(id));
        }
        tx.commit()?;

        debug!(
            "event=post_delete module=repo status=ok post_id={id} removed_comments={removed_comments}"
        );
        Ok(removed_comments)
    }
}

fn parse_post_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        content: row.get("content")?,
    })
}
