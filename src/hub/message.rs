use serde::{Deserialize, Serialize};

use crate::gateway::VideoSummary;

/// Outbound message sent to subscribed connections.
///
/// Serialized as a JSON object tagged with `type`; the `video` variant
/// carries its payload fields in camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Video {
        keyword: String,
        video_id: String,
        title: String,
        description: String,
        channel_id: String,
        channel_title: String,
        thumbnail_url: String,
        video_url: String,
    },
    Heartbeat,
}

impl ServerMessage {
    pub fn video(keyword: &str, summary: &VideoSummary) -> Self {
        ServerMessage::Video {
            keyword: keyword.to_string(),
            video_id: summary.video_id.clone(),
            title: summary.title.clone(),
            description: summary.description.clone(),
            channel_id: summary.channel_id.clone(),
            channel_title: summary.channel_title.clone(),
            thumbnail_url: summary.thumbnail_url.clone(),
            video_url: summary.video_url.clone(),
        }
    }
}
