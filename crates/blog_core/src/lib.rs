//! Core domain logic for the blog backend.
//! Storage, repositories and use-case services live here; HTTP lives in `blog_api`.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::comment::{Comment, CommentDto, CommentId, CommentInput};
pub use model::page::{Page, PageRequest, PostSortField, SortDirection};
pub use model::post::{Post, PostDto, PostId, PostInput};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::comment_service::CommentService;
pub use service::post_service::PostService;
pub use service::{ServiceError, ServiceResult};

