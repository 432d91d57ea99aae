//! Error taxonomy for the fetcher.
//!
//! Failures fall into three groups: remote (the iCloud endpoints or an asset
//! download), destination (the local directory or files in it), and config
//! (bad flag combinations caught before any network call). None of them are
//! retried.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// A failure talking to the iCloud shared-album service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The underlying HTTP request failed (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// A request completed but returned a non-success status.
    #[error("{endpoint} request failed with status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    /// The response body did not have the expected shape.
    #[error("unexpected {endpoint} response: {reason}")]
    Malformed {
        endpoint: &'static str,
        reason: String,
    },
    /// A required field was missing from a response body.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),
    /// A photo had no derivative with a usable download URL.
    #[error("photo {0} has no downloadable derivative")]
    NoDerivative(String),
}

/// A failure accessing the destination directory or a file in it.
#[derive(Debug, Error)]
#[error("destination error at {path}: {source}")]
pub struct DestinationError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl DestinationError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// An invalid invocation, detected before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--filename only makes sense together with --single")]
    FilenameWithoutSingle,
    #[error("album token must not be empty")]
    EmptyToken,
    #[error("album token contains invalid character {0:?}")]
    InvalidTokenChar(char),
}

/// Any error this crate can return.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Destination(#[from] DestinationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Remote(RemoteError::Network(err))
    }
}
