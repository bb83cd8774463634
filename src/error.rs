use std::fmt;

use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::ValidationError;
use crate::services::CourseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::List => "list",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Coarse cause of a failed store round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    NotFound,
    PermissionDenied,
    InvalidArgument,
    Decode,
    Backend,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Network => "network",
            FailureKind::NotFound => "not found",
            FailureKind::PermissionDenied => "permission denied",
            FailureKind::InvalidArgument => "invalid argument",
            FailureKind::Decode => "decode",
            FailureKind::Backend => "backend",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{operation} failed ({kind}): {message}")]
    OperationFailed {
        operation: Operation,
        kind: FailureKind,
        message: String,
    },
}

impl StoreError {
    pub fn new(operation: Operation, kind: FailureKind, message: impl Into<String>) -> Self {
        StoreError::OperationFailed {
            operation,
            kind,
            message: message.into(),
        }
    }

    pub fn backend(operation: Operation, err: impl fmt::Display) -> Self {
        Self::new(operation, FailureKind::Backend, err.to_string())
    }

    pub fn operation(&self) -> Operation {
        match self {
            StoreError::OperationFailed { operation, .. } => *operation,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            StoreError::OperationFailed { kind, .. } => *kind,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            StoreError::OperationFailed { message, .. } => message,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<CourseError> for AppError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::Validation(e) => AppError::Validation(e),
            CourseError::Store(e) => AppError::Store(e),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Store(e) => {
                error!("store error: {}", e);
                let status = match e.kind() {
                    FailureKind::NotFound => StatusCode::NOT_FOUND,
                    FailureKind::PermissionDenied => StatusCode::FORBIDDEN,
                    FailureKind::InvalidArgument => StatusCode::BAD_REQUEST,
                    FailureKind::Network | FailureKind::Decode | FailureKind::Backend => {
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, e.message().to_string())
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}
