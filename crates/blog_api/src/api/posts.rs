use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use blog_core::model::page::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, DEFAULT_SORT_DIR,
};
use blog_core::{Page, PostDto, PostId, PostInput};
use serde::Deserialize;

use crate::error::Result;
use crate::AppState;

pub const POST_DELETED: &str = "Post entity deleted successfully.";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:post_id", get(get_post).put(update_post).delete(delete_post))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub page_no: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

async fn create_post(
    State(state): State<AppState>,
    body: std::result::Result<Json<PostInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PostDto>)> {
    let Json(input) = body?;
    let post = state
        .db
        .run(move |services| services.posts.create_post(&input))
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn list_posts(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListPostsQuery>, QueryRejection>,
) -> Result<Json<Page<PostDto>>> {
    let Query(query) = query?;
    let page_no = query.page_no.unwrap_or(DEFAULT_PAGE_NUMBER);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let sort_by = query.sort_by.unwrap_or_else(|| DEFAULT_SORT_BY.to_string());
    let sort_dir = query.sort_dir.unwrap_or_else(|| DEFAULT_SORT_DIR.to_string());

    let page = state
        .db
        .run(move |services| {
            services
                .posts
                .get_all_posts(page_no, page_size, &sort_by, &sort_dir)
        })
        .await?;
    Ok(Json(page))
}

async fn get_post(
    State(state): State<AppState>,
    path: std::result::Result<Path<PostId>, PathRejection>,
) -> Result<Json<PostDto>> {
    let Path(id) = path?;
    let post = state
        .db
        .run(move |services| services.posts.get_post_by_id(id))
        .await?;
    Ok(Json(post))
}

async fn update_post(
    State(state): State<AppState>,
    path: std::result::Result<Path<PostId>, PathRejection>,
    body: std::result::Result<Json<PostInput>, JsonRejection>,
) -> Result<Json<PostDto>> {
    let Path(id) = path?;
    let Json(input) = body?;
    let post = state
        .db
        .run(move |services| services.posts.update_post(id, &input))
        .await?;
    Ok(Json(post))
}

async fn delete_post(
    State(state): State<AppState>,
    path: std::result::Result<Path<PostId>, PathRejection>,
) -> Result<&'static str> {
    let Path(id) = path?;
    state
        .db
        .run(move |services| services.posts.delete_post(id))
        .await?;
    Ok(POST_DELETED)
}
