use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use blog_core::{CommentDto, CommentId, CommentInput, PostId};

use crate::error::Result;
use crate::AppState;

pub const COMMENT_DELETED: &str = "Comment deleted successfully.";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route(
            "/:comment_id",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}

async fn create_comment(
    State(state): State<AppState>,
    path: std::result::Result<Path<PostId>, PathRejection>,
    body: std::result::Result<Json<CommentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentDto>)> {
    let Path(post_id) = path?;
    let Json(input) = body?;
    let comment = state
        .db
        .run(move |services| services.comments.create_comment(&input, post_id))
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn list_comments(
    State(state): State<AppState>,
    path: std::result::Result<Path<PostId>, PathRejection>,
) -> Result<Json<Vec<CommentDto>>> {
    let Path(post_id) = path?;
    let comments = state
        .db
        .run(move |services| services.comments.get_comments_by_post_id(post_id))
        .await?;
    Ok(Json(comments))
}

async fn get_comment(
    State(state): State<AppState>,
    path: std::result::Result<Path<(PostId, CommentId)>, PathRejection>,
) -> Result<Json<CommentDto>> {
    let Path((post_id, comment_id)) = path?;
    let comment = state
        .db
        .run(move |services| services.comments.get_comment_by_id(post_id, comment_id))
        .await?;
    Ok(Json(comment))
}

async fn update_comment(
    State(state): State<AppState>,
    path: std::result::Result<Path<(PostId, CommentId)>, PathRejection>,
    body: std::result::Result<Json<CommentInput>, JsonRejection>,
) -> Result<Json<CommentDto>> {
    let Path((post_id, comment_id)) = path?;
    let Json(input) = body?;
    let comment = state
        .db
        .run(move |services| {
            services
                .comments
                .update_comment(&input, post_id, comment_id)
        })
        .await?;
    Ok(Json(comment))
}

async fn delete_comment(
    State(state): State<AppState>,
    path: std::result::Result<Path<(PostId, CommentId)>, PathRejection>,
) -> Result<&'static str> {
    let Path((post_id, comment_id)) = path?;
    state
        .db
        .run(move |services| services.comments.delete_comment(post_id, comment_id))
        .await?;
    Ok(COMMENT_DELETED)
}
