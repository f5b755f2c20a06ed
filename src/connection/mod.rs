//! The `connection` module defines the representation of a subscriber in the
//! live feed system.
//!
//! It provides the `Connection` struct, which encapsulates the state of a
//! single connected client, including its unique identifier and the channel
//! for sending messages to it.

pub mod handle;
pub use handle::Connection;
