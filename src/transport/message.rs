use serde::Deserialize;

/// Inbound message from a client.
///
/// The protocol expects exactly one `init` as the first message; anything
/// that does not deserialize into a known shape is logged and ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "init")]
    Init { keywords: Vec<String> },
}
