use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum ApiError {
    NotFound(i64),
    Storage(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Note {} not found", id)).into_response()
            }
            ApiError::Storage(err) => {
                tracing::error!("Store error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err)).into_response()
            }
        }
    }
}

// Lets handlers use `?` on the store's `anyhow::Result`.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err)
    }
}
