use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{GatewayError, VideoSearch, VideoSummary};
use crate::config::YoutubeSettings;

/// YouTube Data API v3 implementation of [`VideoSearch`].
///
/// The API url and key are threaded in at construction; nothing here reads
/// ambient process state.
#[derive(Debug, Clone)]
pub struct YouTubeGateway {
    client: reqwest::Client,
    settings: YoutubeSettings,
}

impl YouTubeGateway {
    pub fn new(settings: YoutubeSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl VideoSearch for YouTubeGateway {
    async fn search(
        &self,
        keyword: &str,
        max_results: u32,
    ) -> Result<Vec<VideoSummary>, GatewayError> {
        let max_results = max_results.to_string();
        let params = [
            ("part", "snippet"),
            ("type", "video"),
            ("order", "date"),
            ("q", keyword),
            ("maxResults", max_results.as_str()),
            ("key", self.settings.api_key.as_str()),
        ];

        debug!("searching videos for '{keyword}'");
        let response = self
            .client
            .get(format!("{}/search", self.settings.api_url))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status().as_u16()));
        }

        let body: Value = response.json().await?;
        let items = body
            .get("items")
            .ok_or_else(|| GatewayError::InvalidResponse("missing items array".to_string()))?;

        Ok(VideoSummary::from_items(items))
    }
}
