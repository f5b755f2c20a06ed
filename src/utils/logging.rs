/// Initialize tracing for the process.
///
/// Maps the configured level name onto a `with_max_level` subscriber;
/// unknown names fall back to `info`.
pub fn init(default_level: &str) {
    let level = match default_level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" | "warning" => tracing::Level::WARN,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    };

    // try_init so tests can call this repeatedly without panicking
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
