use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use super::message::ServerMessage;
use super::watch::{self, Watch};
use crate::connection::Connection;
use crate::gateway::VideoSummary;
use crate::utils::error::Error;

/// Central state of the live feed: which connections are open, which
/// keywords they watch, and which videos have already been delivered.
///
/// The hub is the subscription registry and the broadcast dispatcher in one
/// place. It performs no I/O of its own; sends go through each connection's
/// outbound channel and never block. All mutation happens behind one lock
/// held by the callers (`Arc<Mutex<Hub>>`), which also makes the per-keyword
/// check-then-mark against the seen set atomic.
#[derive(Debug)]
pub struct Hub {
    clients: HashMap<String, Connection>,
    watches: HashMap<String, Watch>,
    seen_capacity: usize,
}

impl Hub {
    pub fn new(seen_capacity: usize) -> Self {
        Self {
            clients: HashMap::new(),
            watches: HashMap::new(),
            seen_capacity,
        }
    }

    /// Registers a connection with its keyword list.
    ///
    /// Keywords are normalized (trimmed, case folded) and deduplicated; a
    /// watch is created for every keyword not already watched, which is what
    /// makes the scheduler pick it up on its next tick. Fails with
    /// `Error::InvalidInput` when no usable keyword remains after
    /// normalization, in which case nothing is registered.
    pub fn register(&mut self, connection: Connection, keywords: &[String]) -> Result<(), Error> {
        let keywords = watch::normalize_keywords(keywords);
        if keywords.is_empty() {
            return Err(Error::InvalidInput(
                "subscription contains no usable keywords".to_string(),
            ));
        }

        let seen_capacity = self.seen_capacity;
        for keyword in &keywords {
            let watch = self.watches.entry(keyword.clone()).or_insert_with(|| {
                info!("started watching '{keyword}'");
                Watch::new(seen_capacity)
            });
            watch.watchers.insert(connection.id.clone());
        }

        debug!("registered {} for {:?}", connection.id, keywords);
        self.clients.insert(connection.id.clone(), connection);
        Ok(())
    }

    /// Removes a connection from the hub and from every keyword it watched.
    ///
    /// Watches left without watchers are destroyed, which stops their
    /// polling and releases their seen history. Unregistering an unknown
    /// connection is a no-op.
    pub fn unregister(&mut self, conn_id: &str) {
        if self.clients.remove(conn_id).is_none() {
            return;
        }

        self.watches.retain(|keyword, watch| {
            watch.watchers.remove(conn_id);
            let keep = !watch.watchers.is_empty();
            if !keep {
                info!("stopped watching '{keyword}'");
            }
            keep
        });

        debug!("unregistered {conn_id}");
    }

    /// Connection ids subscribed to `keyword`; empty if unwatched.
    pub fn watchers_of(&self, keyword: &str) -> Vec<String> {
        self.watches
            .get(keyword)
            .map(|watch| watch.watchers.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn watched_keywords(&self) -> Vec<String> {
        self.watches.keys().cloned().collect()
    }

    pub fn is_watched(&self, keyword: &str) -> bool {
        self.watches.contains_key(keyword)
    }

    pub fn connection_count(&self) -> usize {
        self.clients.len()
    }

    pub fn has_seen(&self, keyword: &str, video_id: &str) -> bool {
        self.watches
            .get(keyword)
            .is_some_and(|watch| watch.seen.contains(video_id))
    }

    /// Marks every watch without an outstanding poll as in flight and
    /// returns their keywords. Keywords whose previous poll has not
    /// completed are skipped until it does.
    pub fn begin_due_polls(&mut self) -> Vec<String> {
        self.watches
            .iter_mut()
            .filter(|(_, watch)| !watch.in_flight)
            .map(|(keyword, watch)| {
                watch.in_flight = true;
                keyword.clone()
            })
            .collect()
    }

    /// Clears the in-flight flag after a failed poll so the keyword is
    /// retried on the next tick.
    pub fn abort_poll(&mut self, keyword: &str) {
        if let Some(watch) = self.watches.get_mut(keyword) {
            watch.in_flight = false;
        }
    }

    /// Hands the hub the outcome of one search poll.
    ///
    /// Results for a keyword nobody watches anymore are discarded. Videos
    /// whose id is already in the seen set are dropped silently; the rest
    /// are recorded and broadcast to this keyword's watchers in the order
    /// the gateway returned them. A send failure on one connection never
    /// prevents delivery to the others: the failed connection is cleaned up
    /// through `unregister` once the fan-out is done.
    pub fn complete_poll(&mut self, keyword: &str, videos: Vec<VideoSummary>) {
        let Some(watch) = self.watches.get_mut(keyword) else {
            debug!("discarding poll result for no-longer-watched '{keyword}'");
            return;
        };
        watch.in_flight = false;
        watch.last_polled = Some(Utc::now());

        let fresh: Vec<VideoSummary> = videos
            .into_iter()
            .filter(|video| {
                !video.video_id.is_empty() && watch.seen.insert(video.video_id.clone())
            })
            .collect();
        if fresh.is_empty() {
            return;
        }
        info!("{} new video(s) for '{keyword}'", fresh.len());

        let watchers: Vec<String> = watch.watchers.iter().cloned().collect();
        let mut failed: Vec<String> = Vec::new();
        for video in &fresh {
            let frame = match serde_json::to_string(&ServerMessage::video(keyword, video)) {
                Ok(text) => WsMessage::text(text),
                Err(e) => {
                    error!("failed to serialize video message: {e}");
                    continue;
                }
            };
            for conn_id in &watchers {
                self.send_to(conn_id, frame.clone(), &mut failed);
            }
        }

        for conn_id in failed {
            self.unregister(&conn_id);
        }
    }

    /// Sends a liveness message to every open connection, with the same
    /// per-connection failure isolation as a video broadcast.
    pub fn heartbeat(&mut self) {
        let frame = match serde_json::to_string(&ServerMessage::Heartbeat) {
            Ok(text) => WsMessage::text(text),
            Err(e) => {
                error!("failed to serialize heartbeat: {e}");
                return;
            }
        };

        let ids: Vec<String> = self.clients.keys().cloned().collect();
        let mut failed: Vec<String> = Vec::new();
        for conn_id in &ids {
            self.send_to(conn_id, frame.clone(), &mut failed);
        }

        for conn_id in failed {
            self.unregister(&conn_id);
        }
    }

    fn send_to(&self, conn_id: &str, frame: WsMessage, failed: &mut Vec<String>) {
        let Some(connection) = self.clients.get(conn_id) else {
            return;
        };
        if let Err(e) = connection.send(frame) {
            warn!("dropping unreachable connection: {e}");
            if !failed.iter().any(|id| id == conn_id) {
                failed.push(conn_id.to_string());
            }
        }
    }
}
