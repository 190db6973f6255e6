//! HTTP transport — the "fetch by URL" capability the cache reads through.
//!
//! This module provides the transport seam and its primitives:
//! [`Fetcher`], [`Response`], [`FetchError`], and the `reqwest`-backed
//! [`HttpFetcher`].
//!
//! The cache never talks to the network directly. It is handed an
//! `Arc<dyn Fetcher>`, so tests can substitute a canned transport and count
//! how many requests actually went out.

use std::pin::Pin;

use bytes::Bytes;
use thiserror::Error;

pub mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use client::HttpFetcher;

/// Boxed error type carried by [`FetchError::Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while fetching or decoding a remote resource.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Returns the request URL the error refers to, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Client(_) => None,
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Decode { url, .. } => {
                Some(url)
            }
        }
    }

    /// Returns `true` for malformed-body failures, `false` for transport failures.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// A completed HTTP exchange: status code and raw body.
///
/// # Examples
///
/// ```
/// use mealfinder::http::Response;
///
/// let response = Response::new(200, r#"{"meals":null}"#);
/// assert!(response.is_success());
/// assert_eq!(response.body().as_ref(), br#"{"meals":null}"#);
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    body: Bytes,
}

impl Response {
    /// Creates a response from a status code and body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the numeric status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the response body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// Future returned by [`Fetcher::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Response, FetchError>> + Send + 'a>>;

/// The "fetch by URL" capability.
///
/// Implementations perform one GET per call and report transport failures as
/// [`FetchError::Transport`]. Non-2xx statuses are returned as ordinary
/// [`Response`]s; deciding what counts as failure is up to the caller.
pub trait Fetcher: Send + Sync + 'static {
    /// Issue a GET request for `url`.
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(Response::new(200, "").is_success());
        assert!(Response::new(204, "").is_success());
        assert!(!Response::new(199, "").is_success());
        assert!(!Response::new(301, "").is_success());
        assert!(!Response::new(404, "").is_success());
        assert!(!Response::new(500, "").is_success());
    }

    #[test]
    fn error_exposes_url() {
        let err = FetchError::Status {
            url: "https://example.com/a".to_owned(),
            status: 503,
        };
        assert_eq!(err.url(), Some("https://example.com/a"));
        assert!(!err.is_decode());
        assert_eq!(
            err.to_string(),
            "request to https://example.com/a returned status 503"
        );
    }

    #[test]
    fn decode_error_is_flagged() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FetchError::Decode {
            url: "u".to_owned(),
            source,
        };
        assert!(err.is_decode());
    }
}
