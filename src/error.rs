use crate::repository;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("auth error: missing role {0}")]
    MissingRole(String),

    #[error("streaming requires Accept: text/event-stream")]
    StreamingNotAccepted,

    #[error("database error: {0}")]
    Database(#[from] repository::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        match self {
            Error::MissingRole(_) => StatusCode::FORBIDDEN,
            Error::StreamingNotAccepted => StatusCode::NOT_ACCEPTABLE,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
        .into_response()
    }
}
