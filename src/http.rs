//! reqwest-backed transport for the VK API

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use tracing::debug;

use crate::error::FeedError;
use crate::traits::HttpFetch;

const USER_AGENT: &str = concat!("vk-rss/", env!("CARGO_PKG_VERSION"));

/// HTTP client with an optional proxy for every scheme
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher, routing all traffic through `proxy` when given
    pub fn new(proxy: Option<&str>) -> Result<Self, FeedError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);

        if let Some(proxy) = proxy {
            let proxy = Proxy::all(proxy)
                .map_err(|e| FeedError::Transport(format!("invalid proxy {proxy}: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, FeedError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))
    }
}
