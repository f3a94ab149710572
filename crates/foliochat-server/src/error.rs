use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use foliochat_schema::ChatErrorBody;
use thiserror::Error;

/// Typed failures for the chat endpoint, mapped onto the wire error bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Empty message")]
    EmptyMessage,
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::EmptyMessage => (
                StatusCode::BAD_REQUEST,
                Json(ChatErrorBody {
                    error: "Empty message".to_string(),
                    details: None,
                }),
            )
                .into_response(),
            ApiError::Upstream(err) => {
                tracing::error!(error = %err, "completion call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ChatErrorBody {
                        error: "Server error".to_string(),
                        details: Some(err.to_string()),
                    }),
                )
                    .into_response()
            }
        }
    }
}
