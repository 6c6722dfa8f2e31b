/// Error types for the search client and settings loader
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors produced while talking to the image API.
///
/// Cloneable so results can travel inside iced messages.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("no API key configured (set PIXABAY_API_KEY or api_key in config.json)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(Arc<reqwest::Error>),

    #[error("server answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode image: {0}")]
    Decode(Arc<image::ImageError>),

    #[error("background task failed: {0}")]
    Join(#[source] Arc<tokio::task::JoinError>),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(Arc::new(err))
    }
}

impl From<image::ImageError> for ApiError {
    fn from(err: image::ImageError) -> Self {
        ApiError::Decode(Arc::new(err))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Join(Arc::new(err))
    }
}

/// Errors produced while reading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
