mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

use settings::Settings;

pub use settings::{ServerSettings, WatchSettings, YoutubeSettings};


/// Loads the configuration from the default file and environment variables.
///
/// Environment keys use a double-underscore separator (`YOUTUBE__API_KEY`)
/// so field names containing underscores survive the mapping. Values found
/// in neither source fall back to `Settings::default()`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("__"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
            log_level: partial
                .server
                .as_ref()
                .and_then(|s| s.log_level.clone())
                .unwrap_or(default.server.log_level),
        },
        youtube: YoutubeSettings {
            api_url: partial
                .youtube
                .as_ref()
                .and_then(|y| y.api_url.clone())
                .unwrap_or(default.youtube.api_url),
            api_key: partial
                .youtube
                .as_ref()
                .and_then(|y| y.api_key.clone())
                .unwrap_or(default.youtube.api_key),
        },
        watch: WatchSettings {
            poll_interval_secs: partial
                .watch
                .as_ref()
                .and_then(|w| w.poll_interval_secs)
                .unwrap_or(default.watch.poll_interval_secs),
            heartbeat_interval_secs: partial
                .watch
                .as_ref()
                .and_then(|w| w.heartbeat_interval_secs)
                .unwrap_or(default.watch.heartbeat_interval_secs),
            max_results: partial
                .watch
                .as_ref()
                .and_then(|w| w.max_results)
                .unwrap_or(default.watch.max_results),
            seen_capacity: partial
                .watch
                .as_ref()
                .and_then(|w| w.seen_capacity)
                .unwrap_or(default.watch.seen_capacity),
            gateway_timeout_secs: partial
                .watch
                .as_ref()
                .and_then(|w| w.gateway_timeout_secs)
                .unwrap_or(default.watch.gateway_timeout_secs),
        },
    })
}
