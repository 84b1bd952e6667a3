use crate::{
    config::Config,
    error::ScrapeError,
    metrics::{
        NodeInfo,
        NodeStats,
    },
};
use eyre::Result;
use reqwest::{
    Client as HttpClient,
    StatusCode,
};
use serde::de::DeserializeOwned;

pub const STATS_PATH: &str = "/_node/stats";
pub const NODE_INFO_PATH: &str = "/_node/";

/// Fetches documents from the Logstash monitoring API.
///
/// Each call performs exactly one GET. There is no retry; the next scrape is the
/// retry. The request deadline configured in [`Config::scrape_timeout`] bounds
/// how long a hung Logstash can hold a scrape.
#[derive(Debug, Clone)]
pub struct StatsFetcher {
    http_client: HttpClient,
    base_url: String,
}

impl StatsFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.scrape_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.logstash_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn node_stats(&self) -> Result<NodeStats, ScrapeError> {
        self.fetch(STATS_PATH).await
    }

    pub async fn node_info(&self) -> Result<NodeInfo, ScrapeError> {
        self.fetch(NODE_INFO_PATH).await
    }

    /// GET `{base_url}{path}` and decode the JSON body.
    ///
    /// The body is read to the end before decoding, so the connection is
    /// released on every path, including the non-200 early return where the
    /// response is dropped unread.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ScrapeError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScrapeError::Fetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScrapeError::Fetch {
                url,
                reason: format!("returned status code {}", status.as_u16()),
            });
        }

        let body = response.bytes().await.map_err(|e| ScrapeError::Fetch {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        trace!(%url, bytes = body.len(), "fetched document");

        serde_json::from_slice(&body).map_err(|e| ScrapeError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}
