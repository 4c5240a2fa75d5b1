//! Transport client for the EpicSevenDB API.
//!
//! # Design
//! `Client` holds a `reqwest::Client` and an immutable base URL; clones share
//! the connection pool. Each call is split into `build_request`, which
//! resolves a relative path against the base, and `execute`, which performs
//! the round-trip under a `Context`, classifies the status, and hands the
//! body to a `Destination`. Changing the base URL yields a new `Client`
//! instead of mutating a shared one.

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};
use url::Url;

use crate::context::Context;
use crate::error::Error;
use crate::heroes::Heroes;
use crate::http::{Destination, ErrorResponse, Request, Response};

pub const DEFAULT_BASE_URL: &str = "https://api.epicsevendb.com/";

const DEFAULT_USER_AGENT: &str = concat!("e7-core/", env!("CARGO_PKG_VERSION"));

/// Upper bound on how much of an unread body is drained so the connection
/// can go back to the pool.
const MAX_BODY_SLURP_SIZE: usize = 2 << 10;

/// Asynchronous client for the EpicSevenDB API.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// A client for the public API with default settings.
    pub fn new() -> Self {
        Self::builder().build().expect("Failed to build HTTP client")
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A client that talks to `base_url` and shares this client's
    /// connection pool. `self` is left untouched.
    pub fn with_base_url(&self, base_url: Url) -> Self {
        Self {
            http: self.http.clone(),
            base_url,
        }
    }

    pub fn heroes(&self) -> Heroes<'_> {
        Heroes::new(self)
    }

    /// Build a request for `path`, which is resolved relative to the base
    /// URL and should not start with a slash.
    pub fn build_request(&self, method: Method, path: &str) -> Result<Request, Error> {
        if !self.base_url.path().ends_with('/') {
            return Err(Error::Configuration {
                base_url: self.base_url.clone(),
            });
        }
        let url = self.base_url.join(path).map_err(|source| Error::PathResolution {
            path: path.to_string(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Request { method, url, headers })
    }

    /// Send `request` and deliver a successful body to `destination`.
    ///
    /// Fails with `MissingContext` before any I/O when `ctx` is `None`. If
    /// the context is cancelled or times out while the call is in flight,
    /// the context's reason is returned, even when the transport failed too.
    /// Non-2xx responses come back as `Error::Status` with the buffered
    /// response attached.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        ctx: Option<&Context>,
        request: Request,
        destination: Destination<'_, T>,
    ) -> Result<Response, Error> {
        let ctx = ctx.ok_or(Error::MissingContext)?;
        if let Some(reason) = ctx.err() {
            return Err(Error::Cancelled(reason));
        }

        let Request { method, url, headers } = request;
        debug!(%method, %url, "sending request");
        let send = self.http.request(method.clone(), url).headers(headers).send();

        let sent = tokio::select! {
            reason = ctx.done() => return Err(Error::Cancelled(reason)),
            sent = send => sent,
        };
        let mut response = match sent {
            Ok(response) => response,
            Err(err) => {
                return Err(match ctx.err() {
                    Some(reason) => Error::Cancelled(reason),
                    None => Error::Transport(err),
                })
            }
        };

        let result = tokio::select! {
            reason = ctx.done() => Err(Error::Cancelled(reason)),
            result = read_response(method, &mut response, destination) => result,
        };

        tokio::select! {
            biased;
            _ = ctx.done() => {}
            _ = drain(&mut response) => {}
        }
        result
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a `Client`.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<Url>,
    user_agent: String,
    connect_timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: None,
            http: None,
        }
    }
}

impl ClientBuilder {
    /// Base URL for all requests. Must end in `/` for requests to build.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Use an existing `reqwest::Client`. `user_agent` and `connect_timeout`
    /// are ignored when this is set.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let base_url = match self.base_url {
            Some(base_url) => base_url,
            None => Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"),
        };
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder().user_agent(self.user_agent);
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(Error::Transport)?
            }
        };
        Ok(Client { http, base_url })
    }
}

/// Classify a buffered response. Anything outside `200..=299` is an
/// `Error::Status` carrying the API's error envelope, if it sent one.
pub fn check_response(response: Response) -> Result<Response, Error> {
    if response.status.is_success() {
        return Ok(response);
    }
    warn!(
        method = %response.method,
        url = %response.url,
        status = response.status.as_u16(),
        "API returned an error status"
    );
    Err(Error::Status(Box::new(ErrorResponse::from_response(response))))
}

async fn read_response<T: DeserializeOwned>(
    method: Method,
    response: &mut reqwest::Response,
    destination: Destination<'_, T>,
) -> Result<Response, Error> {
    let mut raw = Response {
        method,
        url: response.url().clone(),
        status: response.status(),
        headers: response.headers().clone(),
        body: Bytes::new(),
    };
    debug!(status = raw.status.as_u16(), url = %raw.url, "received response");

    if !raw.status.is_success() {
        // A failed read keeps whatever arrived; the status is the error to report.
        let mut body = BytesMut::new();
        let _ = read_to_end(response, &mut body).await;
        raw.body = body.freeze();
        return check_response(raw);
    }

    match destination {
        Destination::Discard => {}
        Destination::Writer(writer) => {
            while let Some(chunk) = response.chunk().await.map_err(Error::Transport)? {
                writer.write_all(&chunk).await.map_err(Error::Write)?;
            }
            writer.flush().await.map_err(Error::Write)?;
        }
        Destination::Value(value) => {
            let mut body = BytesMut::new();
            read_to_end(response, &mut body).await.map_err(Error::Transport)?;
            raw.body = body.freeze();
            // No content is not an error; the destination keeps its value.
            if !raw.body.iter().all(u8::is_ascii_whitespace) {
                *value = serde_json::from_slice(&raw.body).map_err(Error::Decode)?;
            }
        }
    }
    Ok(raw)
}

async fn read_to_end(response: &mut reqwest::Response, body: &mut BytesMut) -> Result<(), reqwest::Error> {
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
    }
    Ok(())
}

/// Whether a response body is small enough to be worth draining. Bodies of
/// unknown length are drained up to the bound.
fn should_drain(content_length: Option<u64>) -> bool {
    content_length.map_or(true, |len| len <= MAX_BODY_SLURP_SIZE as u64)
}

/// Read up to `MAX_BODY_SLURP_SIZE` bytes of whatever body is left so a small
/// response does not pin its connection. Large bodies are left alone.
///
/// No chunk is requested once the bound is reached; the chunk that crosses it
/// is still consumed whole.
async fn drain(response: &mut reqwest::Response) {
    if !should_drain(response.content_length()) {
        trace!("response body too large to drain");
        return;
    }
    let mut remaining = MAX_BODY_SLURP_SIZE;
    while remaining > 0 {
        match response.chunk().await {
            Ok(Some(chunk)) => remaining = remaining.saturating_sub(chunk.len()),
            _ => break,
        }
    }
    trace!(drained = MAX_BODY_SLURP_SIZE - remaining, "drained response body");
}
