use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval, timeout};
use tracing::warn;

use crate::config::WatchSettings;
use crate::gateway::VideoSearch;
use crate::hub::Hub;

/// Drives the poll loop forever: one tick per `poll_interval_secs`, one
/// search task per watched keyword that has no poll outstanding.
pub async fn run(hub: Arc<Mutex<Hub>>, gateway: Arc<dyn VideoSearch>, settings: WatchSettings) {
    let mut ticker = interval(Duration::from_secs(settings.poll_interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        poll_once(&hub, &gateway, &settings);
    }
}

/// One scheduler tick.
///
/// Marks every due keyword as in flight under the hub lock, then spawns an
/// independent search task per keyword so one slow gateway call never
/// blocks the others. Returns the spawned tasks; `run` ignores them, tests
/// await them.
pub fn poll_once(
    hub: &Arc<Mutex<Hub>>,
    gateway: &Arc<dyn VideoSearch>,
    settings: &WatchSettings,
) -> Vec<JoinHandle<()>> {
    let due = hub.lock().unwrap().begin_due_polls();

    due.into_iter()
        .map(|keyword| {
            let hub = hub.clone();
            let gateway = gateway.clone();
            let max_results = settings.max_results;
            let timeout_secs = settings.gateway_timeout_secs;

            tokio::spawn(async move {
                let outcome = timeout(
                    Duration::from_secs(timeout_secs),
                    gateway.search(&keyword, max_results),
                )
                .await;

                match outcome {
                    Ok(Ok(videos)) => hub.lock().unwrap().complete_poll(&keyword, videos),
                    Ok(Err(e)) => {
                        warn!("search for '{keyword}' failed: {e}");
                        hub.lock().unwrap().abort_poll(&keyword);
                    }
                    Err(_) => {
                        warn!("search for '{keyword}' timed out after {timeout_secs}s");
                        hub.lock().unwrap().abort_poll(&keyword);
                    }
                }
            })
        })
        .collect()
}
