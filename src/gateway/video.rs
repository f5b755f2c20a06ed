use serde::{Deserialize, Serialize};
use serde_json::Value;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Immutable summary of one video as returned by the search API.
///
/// `video_id` is the deduplication key; items without one never become a
/// `VideoSummary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub channel_id: String,
    pub thumbnail_url: String,
    pub video_id: String,
    pub video_url: String,
}

impl VideoSummary {
    /// Builds a summary from one `items[]` entry of a search response.
    ///
    /// The `id` field is either an object carrying `videoId` (search
    /// endpoint) or a bare string (videos endpoint); both are accepted.
    /// Returns `None` when no usable id is present.
    pub fn from_item(item: &Value) -> Option<VideoSummary> {
        let id = match item.get("id") {
            Some(Value::Object(map)) => map.get("videoId").and_then(Value::as_str),
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }?;
        if id.is_empty() {
            return None;
        }

        let snippet = item.get("snippet");
        let field = |key: &str, fallback: &str| -> String {
            snippet
                .and_then(|s| s.get(key))
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        };
        let thumbnail_url = snippet
            .and_then(|s| s.get("thumbnails"))
            .and_then(|t| t.get("default"))
            .and_then(|d| d.get("url"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        Some(VideoSummary {
            title: field("title", "No Title"),
            description: field("description", ""),
            channel_title: field("channelTitle", "Unknown Channel"),
            channel_id: field("channelId", "Unknown Channel ID"),
            thumbnail_url,
            video_id: id.to_string(),
            video_url: format!("{WATCH_URL}{id}"),
        })
    }

    /// Parses the `items` array of a search response, dropping entries
    /// without a video id and preserving the API's order.
    pub fn from_items(items: &Value) -> Vec<VideoSummary> {
        items
            .as_array()
            .map(|arr| arr.iter().filter_map(Self::from_item).collect())
            .unwrap_or_default()
    }
}
