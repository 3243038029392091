use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_core::{RepoError, ServiceError};
use log::error;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::PostNotFound(_) | ServiceError::CommentNotFound(_) => {
                Self::NotFound(value.to_string())
            }
            ServiceError::InvalidRelation { .. }
            | ServiceError::Validation(_)
            | ServiceError::InvalidPageRequest(_) => Self::BadRequest(value.to_string()),
            ServiceError::Repo(err) => Self::Database(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Database(e) => {
                let error_code = match e {
                    RepoError::Db(db) if db.is_constraint_violation() => "constraint_violation",
                    _ => "database_error",
                };
                error!("event=http_error module=api status=error error_code={error_code} error={e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                error!("event=http_error module=api status=error error_code=internal_error error={e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use blog_core::db::DbError;
    use blog_core::{RepoError, ServiceError};

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::PostNotFound(1), StatusCode::NOT_FOUND),
            (ServiceError::CommentNotFound(2), StatusCode::NOT_FOUND),
            (
                ServiceError::InvalidRelation {
                    post_id: 1,
                    comment_id: 2,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::InvalidPageRequest("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn store_failures_hide_their_cause() {
        let unique = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            Some("UNIQUE constraint failed: posts.title".to_string()),
        );
        let err = AppError::from(ServiceError::Repo(RepoError::Db(DbError::Sqlite(unique))));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        assert!(!body["error"]["message"].as_str().unwrap().contains("posts.title"));
    }

    #[test]
    fn not_found_message_names_the_resource() {
        let err = AppError::from(ServiceError::PostNotFound(5));
        assert_eq!(err.to_string(), "Post not found with id : '5'");
    }
}
