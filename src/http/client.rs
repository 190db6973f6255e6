//! `reqwest`-backed [`Fetcher`] used by the binary.

use std::time::Duration;

use tracing::debug;

use super::{FetchError, FetchFuture, Fetcher, Response};
use crate::config::Config;

/// Production transport: a shared `reqwest::Client` with rustls.
///
/// The client is built once and reused for every request so connections are
/// pooled across navigations.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a client honouring the timeout and user agent in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let transport = |source: reqwest::Error| FetchError::Transport {
                url: url.to_owned(),
                source: Box::new(source),
            };

            let response = self.client.get(url).send().await.map_err(transport)?;
            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(transport)?;

            debug!(url, status, bytes = body.len(), "fetched");
            Ok(Response::new(status, body))
        })
    }
}
