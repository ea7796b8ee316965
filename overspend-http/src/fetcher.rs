//! Blocking HTTP client for the transaction-search endpoint.
//!
//! Requests are made with an async `reqwest` client driven on a private
//! current-thread runtime, one at a time. Called from a multi-thread tokio
//! runtime the worker is handed off with `block_in_place` first; a
//! current-thread caller cannot be blocked and gets an error instead. The
//! fetcher may be dropped from async code.

use overspend_core::{Error, Page, PageFetcher, Result};
use reqwest::Url;
use std::time::Duration;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://jsonmock.hackerrank.com/api/transactions/search";

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub endpoint: String,
    /// No timeout unless set; the client default applies.
    pub timeout: Option<Duration>,
    /// Ignore proxy settings from the environment.
    pub no_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            no_proxy: false,
        }
    }
}

pub struct HttpPageFetcher {
    client: reqwest::Client,
    endpoint: Url,
    /// Only `None` once dropped.
    runtime: Option<Runtime>,
}

impl HttpPageFetcher {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| Error::validation(format!("invalid endpoint '{}': {e}", config.endpoint)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| Error::network_with("build http client", e))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::network_with("create tokio runtime", e))?;

        Ok(Self {
            client,
            endpoint,
            runtime: Some(runtime),
        })
    }

    /// `<endpoint>?userId=<uid>[&page=<n>]`
    pub fn page_url(&self, user_id: i64, page: Option<u32>) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("userId", &user_id.to_string());
            if let Some(n) = page {
                query.append_pair("page", &n.to_string());
            }
        }
        url
    }

    async fn get_page(&self, url: Url) -> Result<Page> {
        debug!(%url, "GET");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::network_with(format!("GET {url}"), e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::network(format!("GET {url}: {status}")));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::network_with(format!("read body of {url}"), e))?;

        serde_json::from_str(&body)
            .map_err(|e| Error::parse_with(format!("decode page from {url}"), e))
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_page(&self, user_id: i64, page: Option<u32>) -> Result<Page> {
        let url = self.page_url(user_id, page);
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| Error::network(format!("GET {url}: runtime already shut down")))?;

        // Nested block_on panics, so leave any caller runtime first.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::CurrentThread => {
                Err(Error::network(format!(
                    "GET {url}: blocking fetch called from a current-thread tokio runtime"
                )))
            }
            Ok(_) => tokio::task::block_in_place(|| runtime.block_on(self.get_page(url))),
            Err(_) => runtime.block_on(self.get_page(url)),
        }
    }
}

impl Drop for HttpPageFetcher {
    // A plain runtime drop blocks, which panics inside async code.
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overspend_core::ErrorKind;

    fn fetcher(endpoint: &str) -> HttpPageFetcher {
        HttpPageFetcher::new(HttpConfig {
            endpoint: endpoint.to_string(),
            ..HttpConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_page_url_default_page() {
        let f = fetcher(DEFAULT_ENDPOINT);
        assert_eq!(
            f.page_url(1, None).as_str(),
            "https://jsonmock.hackerrank.com/api/transactions/search?userId=1"
        );
    }

    #[test]
    fn test_page_url_explicit_page() {
        let f = fetcher(DEFAULT_ENDPOINT);
        assert_eq!(
            f.page_url(4, Some(3)).as_str(),
            "https://jsonmock.hackerrank.com/api/transactions/search?userId=4&page=3"
        );
    }

    #[test]
    fn test_page_url_keeps_existing_query() {
        let f = fetcher("http://localhost:8080/search?region=eu");
        assert_eq!(
            f.page_url(2, Some(1)).as_str(),
            "http://localhost:8080/search?region=eu&userId=2&page=1"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_validation_error() {
        let err = HttpPageFetcher::new(HttpConfig {
            endpoint: "not a url".to_string(),
            ..HttpConfig::default()
        })
        .err()
        .unwrap();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
