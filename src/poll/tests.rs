use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tungstenite::protocol::Message as WsMessage;

use super::scheduler;
use crate::config::WatchSettings;
use crate::connection::Connection;
use crate::gateway::{GatewayError, VideoSearch, VideoSummary};
use crate::hub::Hub;

fn settings() -> WatchSettings {
    WatchSettings {
        poll_interval_secs: 10,
        heartbeat_interval_secs: 30,
        max_results: 5,
        seen_capacity: 200,
        gateway_timeout_secs: 8,
    }
}

fn video(id: &str) -> VideoSummary {
    VideoSummary {
        title: format!("video {id}"),
        description: String::new(),
        channel_title: "some channel".to_string(),
        channel_id: "UC123".to_string(),
        thumbnail_url: String::new(),
        video_id: id.to_string(),
        video_url: format!("https://www.youtube.com/watch?v={id}"),
    }
}

fn connect(hub: &Arc<Mutex<Hub>>, terms: &[&str]) -> (String, UnboundedReceiver<WsMessage>) {
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let connection = Connection::new(tx);
    let conn_id = connection.id.clone();
    let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
    hub.lock().unwrap().register(connection, &terms).unwrap();
    (conn_id, rx)
}

fn received_video_ids(rx: &mut UnboundedReceiver<WsMessage>) -> Vec<String> {
    let mut ids = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        if let WsMessage::Text(text) = msg {
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            if value["type"] == "video" {
                ids.push(value["videoId"].as_str().unwrap().to_string());
            }
        }
    }
    ids
}

/// Serves a fixed result list per keyword; unknown keywords fail.
struct FixedGateway(HashMap<String, Vec<VideoSummary>>);

impl FixedGateway {
    fn new(results: &[(&str, Vec<VideoSummary>)]) -> Arc<dyn VideoSearch> {
        Arc::new(Self(
            results
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ))
    }
}

#[async_trait]
impl VideoSearch for FixedGateway {
    async fn search(
        &self,
        keyword: &str,
        _max_results: u32,
    ) -> Result<Vec<VideoSummary>, GatewayError> {
        self.0
            .get(keyword)
            .cloned()
            .ok_or(GatewayError::Status(500))
    }
}

/// Blocks every search until `release` is notified.
struct GatedGateway {
    release: Arc<Notify>,
    videos: Vec<VideoSummary>,
}

#[async_trait]
impl VideoSearch for GatedGateway {
    async fn search(
        &self,
        _keyword: &str,
        _max_results: u32,
    ) -> Result<Vec<VideoSummary>, GatewayError> {
        self.release.notified().await;
        Ok(self.videos.clone())
    }
}

/// Never completes; used to exercise the bounded-wait path.
struct HangingGateway;

#[async_trait]
impl VideoSearch for HangingGateway {
    async fn search(
        &self,
        _keyword: &str,
        _max_results: u32,
    ) -> Result<Vec<VideoSummary>, GatewayError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![])
    }
}

async fn finish(handles: Vec<tokio::task::JoinHandle<()>>) {
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_poll_once_queries_every_watched_keyword() {
    let hub = Arc::new(Mutex::new(Hub::new(200)));
    let (_c1, mut rx1) = connect(&hub, &["k1"]);
    let (_c2, mut rx2) = connect(&hub, &["k2"]);
    let gateway = FixedGateway::new(&[("k1", vec![video("v1")]), ("k2", vec![video("v2")])]);

    let handles = scheduler::poll_once(&hub, &gateway, &settings());
    assert_eq!(handles.len(), 2);
    finish(handles).await;

    assert_eq!(received_video_ids(&mut rx1), ["v1"]);
    assert_eq!(received_video_ids(&mut rx2), ["v2"]);
}

#[tokio::test]
async fn test_poll_once_skips_keywords_with_poll_in_flight() {
    let hub = Arc::new(Mutex::new(Hub::new(200)));
    let (_c1, _rx) = connect(&hub, &["k1"]);
    let gateway = FixedGateway::new(&[("k1", vec![])]);

    // Mark the keyword as already being polled.
    assert_eq!(hub.lock().unwrap().begin_due_polls(), ["k1"]);

    let handles = scheduler::poll_once(&hub, &gateway, &settings());
    assert!(handles.is_empty());
}

#[tokio::test]
async fn test_gateway_failure_is_isolated_per_keyword() {
    let hub = Arc::new(Mutex::new(Hub::new(200)));
    let (_c1, mut rx1) = connect(&hub, &["k1"]);
    let (_c2, mut rx2) = connect(&hub, &["k2"]);
    // k1 is unknown to the gateway and fails every call.
    let gateway = FixedGateway::new(&[("k2", vec![video("v2")])]);

    let handles = scheduler::poll_once(&hub, &gateway, &settings());
    assert_eq!(handles.len(), 2);
    finish(handles).await;

    assert!(received_video_ids(&mut rx1).is_empty());
    assert_eq!(received_video_ids(&mut rx2), ["v2"]);

    // Both keywords are due again on the next tick.
    let mut due = hub.lock().unwrap().begin_due_polls();
    due.sort();
    assert_eq!(due, ["k1", "k2"]);
}

#[tokio::test]
async fn test_result_arriving_after_unregister_is_discarded() {
    let hub = Arc::new(Mutex::new(Hub::new(200)));
    let (conn_id, mut rx) = connect(&hub, &["jazz"]);

    let release = Arc::new(Notify::new());
    let gateway: Arc<dyn VideoSearch> = Arc::new(GatedGateway {
        release: release.clone(),
        videos: vec![video("v1")],
    });

    let handles = scheduler::poll_once(&hub, &gateway, &settings());
    assert_eq!(handles.len(), 1);

    // The watch is destroyed while the search is still in flight.
    hub.lock().unwrap().unregister(&conn_id);
    release.notify_one();
    finish(handles).await;

    assert!(received_video_ids(&mut rx).is_empty());
    assert!(!hub.lock().unwrap().is_watched("jazz"));
    assert!(!hub.lock().unwrap().has_seen("jazz", "v1"));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_gateway_call_is_bounded() {
    let hub = Arc::new(Mutex::new(Hub::new(200)));
    let (_c1, mut rx) = connect(&hub, &["jazz"]);
    let gateway: Arc<dyn VideoSearch> = Arc::new(HangingGateway);

    let handles = scheduler::poll_once(&hub, &gateway, &settings());
    finish(handles).await;

    assert!(received_video_ids(&mut rx).is_empty());
    // The timed-out poll released the in-flight flag.
    assert_eq!(hub.lock().unwrap().begin_due_polls(), ["jazz"]);
}
