use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerError;

// ============================================================================
// Error Responses
// ============================================================================
//
// NotFound       -> 404
// DuplicateEmail -> 409
// NoChange       -> 400
// Storage        -> 500 (details stay in the logs)
// Bad JSON body / path id -> 400
//
// ============================================================================

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
        }
    }

    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

impl ResponseError for CustomerError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
            CustomerError::DuplicateEmail => StatusCode::CONFLICT,
            CustomerError::NoChange => StatusCode::BAD_REQUEST,
            CustomerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            CustomerError::Storage(e) => {
                tracing::error!(error = %e, "Customer request failed in storage");
                "internal storage error".to_string()
            }
            other => {
                tracing::debug!(kind = other.kind(), error = %other, "Customer request rejected");
                other.to_string()
            }
        };
        ErrorBody::new(status, message).into_response()
    }
}

pub(super) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = ErrorBody::new(StatusCode::BAD_REQUEST, err.to_string()).into_response();
        InternalError::from_response(err, response).into()
    })
}

pub(super) fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = ErrorBody::new(StatusCode::BAD_REQUEST, err.to_string()).into_response();
        InternalError::from_response(err, response).into()
    })
}
