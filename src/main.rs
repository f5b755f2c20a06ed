use std::sync::{Arc, Mutex};

use tubefeed::config::load_config;
use tubefeed::gateway::{VideoSearch, YouTubeGateway};
use tubefeed::hub::Hub;
use tubefeed::poll;
use tubefeed::transport::websocket::start_websocket_server;
use tubefeed::utils::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let settings = load_config().expect("Failed to load configuration");
    logging::init(&settings.server.log_level);

    if settings.youtube.api_key.is_empty() {
        tracing::warn!("youtube.api_key is empty; the YouTube API will reject search calls");
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let hub = Arc::new(Mutex::new(Hub::new(settings.watch.seen_capacity)));
    let gateway: Arc<dyn VideoSearch> = Arc::new(YouTubeGateway::new(settings.youtube.clone()));

    tokio::spawn(poll::scheduler::run(
        hub.clone(),
        gateway,
        settings.watch.clone(),
    ));
    tokio::spawn(poll::heartbeat::run(
        hub.clone(),
        settings.watch.heartbeat_interval_secs,
    ));

    start_websocket_server(&addr, hub).await;
}
