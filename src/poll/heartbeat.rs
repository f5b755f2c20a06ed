use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

use crate::hub::Hub;

/// Sends a liveness message to every open connection at a fixed interval,
/// independent of whether any keyword produced new videos.
pub async fn run(hub: Arc<Mutex<Hub>>, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        hub.lock().unwrap().heartbeat();
    }
}
