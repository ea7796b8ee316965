//! Error taxonomy for transaction retrieval and analysis.
//!
//! Every error is fatal: nothing in this crate retries or recovers, the
//! caller gets the first failure and the analysis stops there.

use thiserror::Error;

/// Boxed error used to carry the underlying cause of a failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of an [`Error`] for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input, detected before any network access.
    Validation,
    /// Transport-level failure talking to the transaction service.
    Network,
    /// Response body or amount string could not be parsed.
    Parse,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "VALIDATION_ERROR"),
            ErrorKind::Network => write!(f, "NETWORK_ERROR"),
            ErrorKind::Parse => write!(f, "PARSE_ERROR"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Error::Network {
            message: message.into(),
            source: None,
        }
    }

    pub fn network_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
            source: None,
        }
    }

    pub fn parse_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Parse {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Network { .. } => ErrorKind::Network,
            Error::Parse { .. } => ErrorKind::Parse,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
