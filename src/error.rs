/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Error types for the portal client
//!
//! Every failure the client can produce is an [`AppError`]. Callers that only
//! care about the broad category (for example the CLI, which maps categories
//! to exit codes) use [`AppError::kind`].

use reqwest::StatusCode;
use std::fmt;
use std::io;

/// Broad category of an [`AppError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad credentials, missing session or expired session
    Authentication,
    /// Transport failure, timeout or unexpected HTTP status
    Network,
    /// The portal answered with markup the client does not understand
    Parsing,
    /// Fetched or supplied data violates the model constraints
    Validation,
    /// Configuration, serialization and I/O failures
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::Network => "network",
            ErrorKind::Parsing => "parsing",
            ErrorKind::Validation => "validation",
            ErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Main error type of the crate
#[derive(Debug)]
pub enum AppError {
    /// The portal rejected the credentials
    Authentication(String),
    /// An operation that needs a session was called before signing in
    NotAuthenticated,
    /// The portal no longer accepts the session cookies
    SessionExpired,
    /// Transport level failure (connection, timeout, broken body)
    Network(String),
    /// The portal answered with an HTTP status the flow does not expect
    Unexpected(StatusCode),
    /// The portal markup is missing something the flow needs
    Parse(String),
    /// Data failed the model constraints
    Validation(String),
    /// JSON serialization failure
    Json(serde_json::Error),
    /// I/O failure
    Io(io::Error),
    /// Invalid client configuration
    Config(String),
}

impl AppError {
    /// Returns the broad category of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Authentication(_) | AppError::NotAuthenticated | AppError::SessionExpired => {
                ErrorKind::Authentication
            }
            AppError::Network(_) | AppError::Unexpected(_) => ErrorKind::Network,
            AppError::Parse(_) => ErrorKind::Parsing,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Json(_) | AppError::Io(_) | AppError::Config(_) => ErrorKind::Other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Authentication(msg) => write!(f, "authentication failed: {msg}"),
            AppError::NotAuthenticated => write!(f, "not authenticated"),
            AppError::SessionExpired => write!(f, "session expired"),
            AppError::Network(msg) => write!(f, "network error: {msg}"),
            AppError::Unexpected(status) => write!(f, "unexpected http status: {status}"),
            AppError::Parse(msg) => write!(f, "parse error: {msg}"),
            AppError::Validation(msg) => write!(f, "validation error: {msg}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            AppError::Config(e.to_string())
        } else if e.is_timeout() {
            AppError::Network(format!("request timed out: {e}"))
        } else {
            AppError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}
