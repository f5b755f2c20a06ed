//! The `gateway` module wraps the external video search capability.
//!
//! The poll scheduler only ever talks to the [`VideoSearch`] trait, so tests
//! and alternative backends can substitute the real YouTube client.

pub mod video;
pub mod youtube;

pub use video::VideoSummary;
pub use youtube::YouTubeGateway;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Asynchronous keyword search against a video platform.
///
/// Any failure is treated by the caller as "no new videos this tick".
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(
        &self,
        keyword: &str,
        max_results: u32,
    ) -> Result<Vec<VideoSummary>, GatewayError>;
}
