//! Shared store handle for request handlers.
//!
//! # Invariants
//! - One SQLite connection per process; requests take turns on it.
//! - Store work runs on the blocking pool, never on async worker threads.

use crate::config::{DatabaseConfig, IN_MEMORY_DATABASE};
use crate::error::{AppError, Result};
use blog_core::db::{open_db, open_db_in_memory, DbResult};
use blog_core::{
    CommentService, PostService, ServiceResult, SqliteCommentRepository, SqlitePostRepository,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Post and comment services bound to one borrowed connection.
pub struct Services<'conn> {
    pub posts: PostService<SqlitePostRepository<'conn>, SqliteCommentRepository<'conn>>,
    pub comments: CommentService<SqliteCommentRepository<'conn>, SqlitePostRepository<'conn>>,
}

impl<'conn> Services<'conn> {
    fn try_new(conn: &'conn Connection) -> Result<Self> {
        Ok(Self {
            posts: PostService::new(
                SqlitePostRepository::try_new(conn)?,
                SqliteCommentRepository::try_new(conn)?,
            ),
            comments: CommentService::new(
                SqliteCommentRepository::try_new(conn)?,
                SqlitePostRepository::try_new(conn)?,
            ),
        })
    }
}

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (and migrates) the configured store.
    pub fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        if config.path.trim() == IN_MEMORY_DATABASE {
            return Self::in_memory();
        }
        Ok(Self::from_connection(open_db(config.path.trim())?))
    }

    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one use-case against the store on the blocking pool.
    pub async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Services<'_>) -> ServiceResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<T> {
            let guard = conn
                .lock()
                .map_err(|_| AppError::Internal("database connection lock poisoned".to_string()))?;
            let services = Services::try_new(&guard)?;
            Ok(f(&services)?)
        })
        .await
        .map_err(|err| AppError::Internal(format!("store task failed: {err}")))?
    }
}
