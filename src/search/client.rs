use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::error::{Error, Result};
use crate::search::fetcher::Fetcher;
use crate::search::request::build_request_url;

pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("novelcrawler/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn request_url(&self, key: &str) -> String {
        build_request_url(&self.base_url, key)
    }
}

#[async_trait]
impl Fetcher for SearchClient {
    async fn fetch(&self, key: &str) -> Result<String> {
        let url = self.request_url(key);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| Error::Fetch {
            key: key.to_string(),
            reason: if e.is_timeout() {
                "request timed out".to_string()
            } else {
                e.to_string()
            },
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                key: key.to_string(),
                status,
            });
        }

        Ok(response.text().await?)
    }

    fn name(&self) -> &str {
        "search-api"
    }
}
