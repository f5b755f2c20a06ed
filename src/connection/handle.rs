use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::utils::error::Error;

/// One live channel to a subscribing client.
///
/// The connection is identified by a unique `id` and owns the sending half
/// of the channel drained by that client's WebSocket forward task.
#[derive(Debug)]
pub struct Connection {
    /// Unique identifier for the connection.
    pub id: String,

    /// Channel to send WebSocket messages to the client.
    pub sender: UnboundedSender<WsMessage>,
}

impl Connection {
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: format!("conn-{}", Uuid::new_v4()),
            sender,
        }
    }

    /// Queues a message for delivery.
    ///
    /// Fails once the receiving side is gone, which is how a silently
    /// disconnected client is detected.
    pub fn send(&self, message: WsMessage) -> Result<(), Error> {
        self.sender
            .send(message)
            .map_err(|e| Error::Transport(format!("{}: {}", self.id, e)))
    }
}
