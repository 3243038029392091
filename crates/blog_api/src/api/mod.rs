mod comments;
mod posts;

use axum::Router;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/posts", posts::routes())
        .nest("/posts/:post_id/comments", comments::routes())
}
