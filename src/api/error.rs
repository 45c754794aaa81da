use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::convert::ConvertError;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("bad request")]
    BadRequest,
    #[error("conversion failed: {0}")]
    ConversionFailed(#[from] ConvertError),
}

impl DispatchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::BadRequest => StatusCode::BAD_REQUEST,
            DispatchError::ConversionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DispatchError {
    /// 400 carries nothing; 500 carries the error text as a plain-text line
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            DispatchError::BadRequest => status.into_response(),
            DispatchError::ConversionFailed(_) => (
                status,
                [(header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())],
                format!("{self}\n"),
            )
                .into_response(),
        }
    }
}
