use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::identify::IdentifyError;
use crate::profile::{ProfileServiceError, StoreError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Catalog(CatalogError),
    Profile(ProfileServiceError),
    Identify(IdentifyError),
    NotFound(String),
    InvalidInput(String),
    Unavailable(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Profile(err) => write!(f, "profile error: {}", err),
            AppError::Identify(err) => write!(f, "identification error: {}", err),
            AppError::NotFound(what) => write!(f, "{} not found", what),
            AppError::InvalidInput(reason) => write!(f, "invalid input: {}", reason),
            AppError::Unavailable(what) => write!(f, "{} is unavailable", what),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Profile(err) => Some(err),
            AppError::Identify(err) => Some(err),
            AppError::NotFound(_) | AppError::InvalidInput(_) | AppError::Unavailable(_) => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Profile(ProfileServiceError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Profile(ProfileServiceError::Store(StoreError::InvalidSession(_))) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Identify(IdentifyError::UnsupportedMedia(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::Identify(IdentifyError::EmptyImage | IdentifyError::InvalidEncoding(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Identify(IdentifyError::Provider(_) | IdentifyError::Malformed(_)) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Catalog(_)
            | AppError::Profile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<ProfileServiceError> for AppError {
    fn from(value: ProfileServiceError) -> Self {
        Self::Profile(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Profile(ProfileServiceError::Store(value))
    }
}

impl From<IdentifyError> for AppError {
    fn from(value: IdentifyError) -> Self {
        Self::Identify(value)
    }
}
