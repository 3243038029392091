//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the post and comment use-cases.
//! - Map records to transfer shapes and report semantic failures.
//!
//! # Invariants
//! - Services never bypass repository contracts.
//! - Services stay storage-agnostic; they only see repository traits.

use crate::model::comment::CommentId;
use crate::model::post::PostId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use validator::ValidationErrors;

pub mod comment_service;
pub mod post_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by post and comment use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced post does not exist.
    PostNotFound(PostId),
    /// Referenced comment does not exist.
    CommentNotFound(CommentId),
    /// Comment exists but belongs to another post.
    InvalidRelation {
        post_id: PostId,
        comment_id: CommentId,
    },
    /// Request input violates one or more field rules.
    Validation(ValidationErrors),
    /// Page size or sort field is not acceptable.
    InvalidPageRequest(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostNotFound(id) => write!(f, "Post not found with id : '{id}'"),
            Self::CommentNotFound(id) => write!(f, "Comment not found with id : '{id}'"),
            Self::InvalidRelation {
                post_id,
                comment_id,
            } => write!(
                f,
                "Comment {comment_id} does not belong to the post {post_id}"
            ),
            Self::Validation(err) => write!(f, "invalid input: {err}"),
            Self::InvalidPageRequest(message) => write!(f, "invalid page request: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::PostNotFound(id) => Self::PostNotFound(id),
            RepoError::CommentNotFound(id) => Self::CommentNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}
