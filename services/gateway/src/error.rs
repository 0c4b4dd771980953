use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use event_store::StoreError;
use thiserror::Error;
use types::errors::{CategoryError, LookbackError};

/// Non-standard "Bandwidth Limit Exceeded" status used for an exhausted gate.
pub const BANDWIDTH_EXHAUSTED: u16 = 509;

/// Central error type for the event gateway.
///
/// The `Display` text is the response body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event {0} is undefined")]
    InvalidCategory(String),

    #[error("channel bandwidth exhausted")]
    CapacityExhausted,

    #[error("Parameter '{0}' is incorrect")]
    InvalidParameter(&'static str),

    #[error("{0}")]
    StoreFailure(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCategory(_) | AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::CapacityExhausted => StatusCode::from_u16(BANDWIDTH_EXHAUSTED)
                .unwrap_or(StatusCode::SERVICE_UNAVAILABLE),
            AppError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::Undefined(name) => AppError::InvalidCategory(name),
            CategoryError::Empty => AppError::InvalidCategory(String::new()),
            CategoryError::Reserved(name) => AppError::InvalidCategory(name),
        }
    }
}

impl From<LookbackError> for AppError {
    fn from(err: LookbackError) -> Self {
        AppError::InvalidParameter(err.parameter())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
