use crate::feed::config::FeedConfig;
use crate::feed::error::FeedError;
use log::{info, warn};
use reqwest::Client;
use serde_json::Value;

/// Downloads the forecast document and parses it as JSON.
///
/// The client does not retry; every failure is returned to the caller.
pub struct FeedClient {
    config: FeedConfig,
    download_client: Client,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let download_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FeedError::ClientBuild)?;
        Ok(FeedClient {
            config,
            download_client,
        })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetches the configured feed URL and decodes the body as JSON.
    ///
    /// Transport failures, non-2xx statuses and truncated bodies are reported
    /// separately from bodies that are not JSON ([`FeedError::Decode`]).
    pub async fn fetch_document(&self) -> Result<Value, FeedError> {
        let url = self.config.feed_url.clone();
        info!("Fetching forecast feed from {}", url);

        let mut request = self.download_client.get(&url);
        if let Some(api_key) = &self.config.api_key {
            request = request.query(&[("Authorization", api_key)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FeedError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FeedError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    FeedError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::BodyRead(url.clone(), e))?;
        info!("Downloaded {} bytes from {}", body.len(), url);

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Feed body from {} is not JSON: {}", url, e);
            FeedError::Decode { url, source: e }
        })
    }
}
