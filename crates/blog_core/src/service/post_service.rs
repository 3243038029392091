//! Post use-case service.
//!
//! # Responsibility
//! - Create, read, page, update and delete posts.
//! - Embed each post's comments in the returned transfer shape.
//!
//! # Invariants
//! - No service-level duplicate-title check; the store decides.
//! - Page envelopes are built from one `COUNT(*)` plus one page query.

use crate::model::comment::{Comment, CommentDto};
use crate::model::page::{Page, PageRequest, PostSortField, SortDirection, MAX_PAGE_SIZE};
use crate::model::post::{Post, PostDto, PostId, PostInput};
use crate::repo::comment_repo::CommentRepository;
use crate::repo::post_repo::PostRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use std::collections::HashMap;
use validator::Validate;

/// Use-case service for posts.
pub struct PostService<P: PostRepository, C: CommentRepository> {
    posts: P,
    comments: C,
}

impl<P: PostRepository, C: CommentRepository> PostService<P, C> {
    pub fn new(posts: P, comments: C) -> Self {
        Self { posts, comments }
    }

    /// Validates and persists a new post.
    pub fn create_post(&self, input: &PostInput) -> ServiceResult<PostDto> {
        input.validate()?;
        let post = self.posts.create_post(input)?;
        info!(
            "event=post_create module=service status=ok post_id={}",
            post.id
        );
        Ok(PostDto::from_post(post, Vec::new()))
    }

    /// Returns one page of posts.
    ///
    /// `sort_by` must name a post column; `sort_dir` is ascending unless it
    /// equals `desc` ignoring case.
    pub fn get_all_posts(
        &self,
        page_number: u32,
        page_size: u32,
        sort_by: &str,
        sort_dir: &str,
    ) -> ServiceResult<Page<PostDto>> {
        let sort_field = PostSortField::parse(sort_by).ok_or_else(|| {
            ServiceError::InvalidPageRequest(format!("unknown sort field `{sort_by}`"))
        })?;
        let request = PageRequest::new(
            page_number,
            page_size,
            sort_field,
            SortDirection::parse(sort_dir),
        )
        .ok_or_else(|| {
            ServiceError::InvalidPageRequest(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            ))
        })?;

        let total = self.posts.count_posts()?;
        let posts = self.posts.list_posts(&request)?;
        let post_ids: Vec<PostId> = posts.iter().map(|post| post.id).collect();
        let mut comments_by_post: HashMap<PostId, Vec<Comment>> = HashMap::new();
        for comment in self.comments.list_by_post_ids(&post_ids)? {
            comments_by_post
                .entry(comment.post_id)
                .or_default()
                .push(comment);
        }

        let page = Page::new(posts, &request, total).map(|post| {
            let comments = comments_by_post.remove(&post.id).unwrap_or_default();
            to_dto(post, comments)
        });
        Ok(page)
    }

    /// Returns one post with its comments.
    pub fn get_post_by_id(&self, id: PostId) -> ServiceResult<PostDto> {
        let post = self.require_post(id)?;
        let comments = self.comments.list_by_post_id(id)?;
        Ok(to_dto(post, comments))
    }

    /// Overwrites title, description and content of an existing post.
    pub fn update_post(&self, id: PostId, input: &PostInput) -> ServiceResult<PostDto> {
        self.require_post(id)?;
        input.validate()?;
        let post = self.posts.update_post(id, input)?;
        let comments = self.comments.list_by_post_id(id)?;
        Ok(to_dto(post, comments))
    }

    /// Deletes a post together with its comments.
    pub fn delete_post(&self, id: PostId) -> ServiceResult<()> {
        self.require_post(id)?;
        let removed_comments = self.posts.delete_post(id)?;
        info!(
            "event=post_delete module=service status=ok post_id={id} removed_comments={removed_comments}"
        );
        Ok(())
    }

    fn require_post(&self, id: PostId) -> ServiceResult<Post> {
        self.posts
            .get_post(id)?
            .ok_or(ServiceError::PostNotFound(id))
    }
}

fn to_dto(post: Post, comments: Vec<Comment>) -> PostDto {
    let comments = comments
        .into_iter()
        .map(|comment| CommentDto::from_comment(comment, Some(post.title.as_str())))
        .collect();
    PostDto::from_post(post, comments)
}
