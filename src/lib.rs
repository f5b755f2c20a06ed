//! # tubefeed
//!
//! `tubefeed` is a real-time keyword watch service for YouTube. Clients open
//! a WebSocket connection, announce the search keywords they care about, and
//! from then on receive a push notification for every newly published video
//! matching one of those keywords, without ever re-issuing a search.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `hub`: The central component that tracks watched keywords, subscribed
//!   connections, already-delivered videos, and message fan-out.
//! - `connection`: Represents a connected WebSocket subscriber.
//! - `gateway`: The video search capability, with a YouTube Data API implementation.
//! - `poll`: Timer-driven tasks that poll watched keywords and emit heartbeats.
//! - `transport`: Manages the WebSocket server and communication with clients.
//! - `config`: Handles loading and managing server configuration.
//! - `utils`: Contains shared utilities, such as error handling and logging setup.

pub mod config;
pub mod connection;
pub mod gateway;
pub mod hub;
pub mod poll;
pub mod transport;
pub mod utils;
