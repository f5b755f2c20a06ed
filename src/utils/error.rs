use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors raised by the watch engine.
///
/// None of these are fatal to the process: an invalid subscription closes
/// that connection, a gateway failure skips one poll tick, and a transport
/// failure unregisters the one affected connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid subscription: {0}")]
    InvalidInput(String),

    #[error("video search gateway failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("connection transport failed: {0}")]
    Transport(String),
}
