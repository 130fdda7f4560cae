use crate::reveal::RevealError;
use crate::storage::StoreError;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Reveal(#[from] RevealError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        let status = match &err {
            CalendarError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CalendarError::Reveal(RevealError::UnknownDay(_)) => StatusCode::NOT_FOUND,
            CalendarError::Reveal(RevealError::Locked(_)) => StatusCode::FORBIDDEN,
            CalendarError::Reveal(RevealError::InProgress(_)) => StatusCode::CONFLICT,
        };
        if status.is_server_error() {
            tracing::error!("calendar operation failed: {err}");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
