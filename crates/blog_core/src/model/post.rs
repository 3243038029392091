//! Post records and transfer shapes.

use super::comment::CommentDto;
use super::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store-generated post identifier.
pub type PostId = i64;

/// Persisted post row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    /// Unique across all posts.
    pub title: String,
    pub description: String,
    pub content: String,
}

/// Request body for creating or replacing a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostInput {
    #[validate(length(min = 2), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(min = 10), custom(function = "not_blank"))]
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
}

/// Post as returned to API callers, with its comments embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: PostId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub comments: Vec<CommentDto>,
}

impl PostDto {
    /// Copies post fields and attaches already-mapped comments.
    pub fn from_post(post: Post, comments: Vec<CommentDto>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            content: post.content,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PostInput;
    use validator::Validate;

    fn input(title: &str, description: &str, content: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            description: description.to_string(),
            content: content.to_string(),
        }
    }

    fn failed_fields(input: &PostInput) -> Vec<String> {
        let mut fields: Vec<String> = input
            .validate()
            .unwrap_err()
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        fields
    }

    #[test]
    fn validate_accepts_complete_input() {
        assert!(input("Hello", "a long enough description", "body").validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_and_short_fields() {
        assert_eq!(
            failed_fields(&input("   ", "a long enough description", "body")),
            vec!["title"]
        );
        assert_eq!(
            failed_fields(&input("Hello", "short", "body")),
            vec!["description"]
        );
        assert_eq!(
            failed_fields(&input("H", "short", "  ")),
            vec!["content", "description", "title"]
        );
    }
}
