/// Error types for the catalog application

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::api::message_for_status;

/// Why a catalog fetch failed.
///
/// The `Display` output is the human-readable message shown in the error
/// region, so every variant renders as a complete sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response
    #[error("A network error occurred while fetching products: {0}")]
    Transport(String),

    /// The response body was not a catalog
    #[error("The catalog response could not be read: {0}")]
    Decode(String),
}

impl FetchError {
    /// Build a status error with the friendly message for `status`
    pub fn from_status(status: u16) -> Self {
        FetchError::Status {
            status,
            message: message_for_status(status),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::from_status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Problems reading the optional settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
