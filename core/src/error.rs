//! Error types for the EpicSevenDB client.
//!
//! # Design
//! A single `Error` enum covers every failure a call can surface, one variant
//! per kind, so callers branch with `matches!` instead of inspecting messages.
//! `Status` boxes its `ErrorResponse` because it carries the buffered
//! response and would otherwise dominate the enum's size.

use std::fmt;

use thiserror::Error;
use url::Url;

use crate::codec::UnrecognizedValue;
use crate::http::ErrorResponse;

/// Why a `Context` stopped a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancelled {
    /// The context's cancellation token was triggered.
    Canceled,
    /// The context's deadline passed.
    DeadlineExceeded,
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cancelled::Canceled => write!(f, "context canceled"),
            Cancelled::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}

/// Errors returned by `Client` and the services built on it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("base URL must have a trailing slash, but {base_url} does not")]
    Configuration { base_url: Url },

    #[error("cannot resolve {path:?} against the base URL: {source}")]
    PathResolution {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("context must be supplied")]
    MissingContext,

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("{0}")]
    Cancelled(Cancelled),

    #[error("{0}")]
    Status(Box<ErrorResponse>),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to write response body: {0}")]
    Write(#[source] std::io::Error),

    #[error(transparent)]
    UnrecognizedValue(#[from] UnrecognizedValue),

    #[error("no results returned for {path}")]
    EmptyResult { path: String },
}

impl Error {
    /// True for `Canceled` and `DeadlineExceeded`.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }

    /// The API error response, if the server answered outside the 2xx range.
    pub fn status(&self) -> Option<&ErrorResponse> {
        match self {
            Error::Status(response) => Some(response),
            _ => None,
        }
    }
}
