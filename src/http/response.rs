//! Response mapping.
//!
//! # Responsibilities
//! - Turn a [`RelayResult`] into an HTTP response
//! - Success: 200, documented content-type, upstream body unchanged
//! - Failure: 500 with `{"error": <label>, "detail": <cause>}`

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::relay::RelayResult;

/// JSON body of every failed relay route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
}

impl IntoResponse for RelayResult {
    fn into_response(self) -> Response {
        match self {
            RelayResult::Success { content_type, body } => {
                ([(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            RelayResult::Failure { message, cause } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: message.to_string(),
                    detail: cause,
                }),
            )
                .into_response(),
        }
    }
}
