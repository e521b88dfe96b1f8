//! Error handling for the gateway
//!
//! Every failure that reaches the HTTP boundary is a [`GatewayError`] and is
//! rendered as `{"error": message}`.

#![allow(missing_docs)]

use crate::core::providers::ProviderError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Gateway configuration errors (config file, bind address)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential resolution or upstream generation errors
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body could not be read
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn payload_too_large<S: Into<String>>(message: S) -> Self {
        Self::PayloadTooLarge(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Message shown to HTTP clients, without the category prefix
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Provider(e) => e.message().to_string(),
            GatewayError::NotFound(msg)
            | GatewayError::BadRequest(msg)
            | GatewayError::PayloadTooLarge(msg)
            | GatewayError::Config(msg)
            | GatewayError::Internal(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            // configuration and upstream failures alike surface as 500
            GatewayError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Config(_)
            | GatewayError::Yaml(_)
            | GatewayError::Io(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
        })
    }
}

/// Standard error response format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
