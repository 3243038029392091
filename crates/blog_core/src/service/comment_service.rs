//! Comment use-case service.
//!
//! # Responsibility
//! - Create, list, read, update and delete comments scoped to a post.
//! - Denormalize the parent post title onto returned comments.
//!
//! # Invariants
//! - Post existence is checked before comment existence.
//! - Id-addressed operations reject comments owned by another post with
//!   `ServiceError::InvalidRelation`.
//! - Listing by post id performs no post existence check.

use crate::model::comment::{Comment, CommentDto, CommentId, CommentInput};
use crate::model::post::{Post, PostId};
use crate::repo::comment_repo::CommentRepository;
use crate::repo::post_repo::PostRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};
use validator::Validate;

/// Use-case service for comments.
pub struct CommentService<C: CommentRepository, P: PostRepository> {
    comments: C,
    posts: P,
}

impl<C: CommentRepository, P: PostRepository> CommentService<C, P> {
    pub fn new(comments: C, posts: P) -> Self {
        Self { comments, posts }
    }

    /// Attaches a new comment to an existing post.
    pub fn create_comment(&self, input: &CommentInput, post_id: PostId) -> ServiceResult<CommentDto> {
        let post = self.require_post(post_id)?;
        input.validate()?;
        let comment = self.comments.create_comment(post.id, input)?;
        info!(
            "event=comment_create module=service status=ok comment_id={} post_id={}",
            comment.id, post.id
        );
        Ok(CommentDto::from_comment(comment, Some(post.title.as_str())))
    }

    /// Lists the comments of `post_id`; unknown posts yield an empty list.
    pub fn get_comments_by_post_id(&self, post_id: PostId) -> ServiceResult<Vec<CommentDto>> {
        let comments = self.comments.list_by_post_id(post_id)?;
        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let title = self.posts.get_post(post_id)?.map(|post| post.title);
        Ok(comments
            .into_iter()
            .map(|comment| CommentDto::from_comment(comment, title.as_deref()))
            .collect())
    }

    /// Returns one comment after checking it belongs to `post_id`.
    pub fn get_comment_by_id(
        &self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> ServiceResult<CommentDto> {
        let (post, comment) = self.require_owned_comment(post_id, comment_id)?;
        Ok(CommentDto::from_comment(comment, Some(post.title.as_str())))
    }

    /// Overwrites name, email and body of a comment owned by `post_id`.
    pub fn update_comment(
        &self,
        input: &CommentInput,
        post_id: PostId,
        comment_id: CommentId,
    ) -> ServiceResult<CommentDto> {
        let (post, _) = self.require_owned_comment(post_id, comment_id)?;
        input.validate()?;
        let updated = self.comments.update_comment(comment_id, input)?;
        Ok(CommentDto::from_comment(updated, Some(post.title.as_str())))
    }

    /// Deletes a comment owned by `post_id`.
    pub fn delete_comment(&self, post_id: PostId, comment_id: CommentId) -> ServiceResult<()> {
        self.require_owned_comment(post_id, comment_id)?;
        self.comments.delete_comment(comment_id)?;
        info!(
            "event=comment_delete module=service status=ok comment_id={comment_id} post_id={post_id}"
        );
        Ok(())
    }

    fn require_post(&self, post_id: PostId) -> ServiceResult<Post> {
        self.posts
            .get_post(post_id)?
            .ok_or(ServiceError::PostNotFound(post_id))
    }

    fn require_owned_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> ServiceResult<(Post, Comment)> {
        let post = self.require_post(post_id)?;
        let comment = self
            .comments
            .get_comment(comment_id)?
            .ok_or(ServiceError::CommentNotFound(comment_id))?;

        if comment.post_id != post.id {
            warn!(
                "event=comment_relation module=service status=rejected comment_id={comment_id} post_id={post_id} owner_post_id={}",
                comment.post_id
            );
            return Err(ServiceError::InvalidRelation {
                post_id,
                comment_id,
            });
        }

        Ok((post, comment))
    }
}
