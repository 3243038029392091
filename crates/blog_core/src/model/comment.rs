//! Comment records and transfer shapes.

use super::post::PostId;
use super::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store-generated comment identifier.
pub type CommentId = i64;

/// Persisted comment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub name: String,
    pub email: String,
    pub body: String,
    /// Owning post; always points at an existing row.
    pub post_id: PostId,
}

/// Request body for creating or replacing a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CommentInput {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 10), custom(function = "not_blank"))]
    pub body: String,
}

/// Comment as returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: CommentId,
    pub name: String,
    pub email: String,
    pub body: String,
    /// Title of the owning post, when the parent was loaded alongside.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub post_title: Option<String>,
}

impl CommentDto {
    /// Copies comment fields and the denormalized parent title.
    pub fn from_comment(comment: Comment, post_title: Option<&str>) -> Self {
        Self {
            id: comment.id,
            name: comment.name,
            email: comment.email,
            body: comment.body,
            post_title: post_title.map(str::to_string),
        }
    }
}
