//! HTTP exchange types for the EpicSevenDB client.
//!
//! # Design
//! `Request` and `Response` describe an exchange as plain data. A `Request` is
//! produced by `Client::build_request` and consumed by `Client::execute`; a
//! `Response` is what the caller gets back, with the body buffered whenever
//! the client had to read it (error classification, JSON decoding). Keeping
//! the response as owned data means an `ErrorResponse` can carry the whole
//! exchange without borrowing the connection.

use std::fmt;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWrite;
use url::Url;

/// An API request ready to be executed. Read-only once built.
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
}

impl Request {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// An API response described as plain data.
#[derive(Debug, Clone)]
pub struct Response {
    /// Method of the request that produced this response.
    pub method: Method,
    /// Final URL after redirects.
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Buffered body. Empty when the body was streamed into a writer or was
    /// never read.
    pub body: Bytes,
}

/// Where `Client::execute` puts a successful response body.
pub enum Destination<'a, T> {
    /// Leave the body unread.
    Discard,
    /// Copy the body verbatim.
    Writer(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// Decode the body as JSON. A blank body leaves the value untouched.
    Value(&'a mut T),
}

impl<'a> Destination<'a, IgnoredAny> {
    pub fn discard() -> Self {
        Destination::Discard
    }

    pub fn writer(writer: &'a mut (dyn AsyncWrite + Unpin + Send)) -> Self {
        Destination::Writer(writer)
    }
}

impl<T> fmt::Debug for Destination<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Discard => f.write_str("Discard"),
            Destination::Writer(_) => f.write_str("Writer"),
            Destination::Value(_) => f.write_str("Value"),
        }
    }
}

/// Metadata returned with every EpicSevenDB response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(rename = "requestDate")]
    pub request_date: String,
    #[serde(rename = "apiVersion")]
    pub api_version: String,
}

/// A response outside the 2xx range, with whatever the API said about it.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    pub response: Response,
    pub message: String,
    pub stack: String,
    pub meta: Metadata,
}

/// The API's error envelope: `{"error": ..., "stack": ..., "meta": {...}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub error: String,
    pub stack: String,
    pub meta: Metadata,
}

impl ErrorResponse {
    /// Build from a buffered response. An unparseable body leaves the
    /// message, stack and metadata empty.
    pub(crate) fn from_response(response: Response) -> Self {
        let body: ErrorBody = serde_json::from_slice(&response.body).unwrap_or_default();
        Self {
            response,
            message: body.error,
            stack: body.stack,
            meta: body.meta,
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.response.method,
            self.response.url,
            self.response.status.as_u16(),
            self.message
        )
    }
}
