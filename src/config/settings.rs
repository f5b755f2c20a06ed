use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the server, the YouTube gateway, and the watch
/// engine.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub youtube: YoutubeSettings,
    pub watch: WatchSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the WebSocket listener binds to, and the log
/// verbosity.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

/// Configuration for the YouTube Data API gateway.
///
/// The key is expected to come from the environment (`YOUTUBE__API_KEY`) or
/// a `.env` file rather than from a checked-in config file.
#[derive(Debug, Deserialize, Clone)]
pub struct YoutubeSettings {
    pub api_url: String,
    pub api_key: String,
}

/// Operational parameters of the watch engine: poll and heartbeat cadence,
/// search page size, per-keyword dedup history, and the bound on one
/// gateway call.
#[derive(Debug, Deserialize, Clone)]
pub struct WatchSettings {
    pub poll_interval_secs: u64,
    pub heartbeat_interval_secs: u64,
    pub max_results: u32,
    pub seen_capacity: usize,
    pub gateway_timeout_secs: u64,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub youtube: Option<PartialYoutubeSettings>,
    pub watch: Option<PartialWatchSettings>,
}

/// Partial server settings.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Partial YouTube gateway settings.
#[derive(Debug, Deserialize)]
pub struct PartialYoutubeSettings {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

/// Partial watch engine settings.
#[derive(Debug, Deserialize)]
pub struct PartialWatchSettings {
    pub poll_interval_secs: Option<u64>,
    pub heartbeat_interval_secs: Option<u64>,
    pub max_results: Option<u32>,
    pub seen_capacity: Option<usize>,
    pub gateway_timeout_secs: Option<u64>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                log_level: "info".to_string(),
            },
            youtube: YoutubeSettings {
                api_url: "https://www.googleapis.com/youtube/v3".to_string(),
                api_key: String::new(),
            },
            watch: WatchSettings {
                poll_interval_secs: 10,
                heartbeat_interval_secs: 30,
                max_results: 10,
                seen_capacity: 200,
                gateway_timeout_secs: 8,
            },
        }
    }
}
