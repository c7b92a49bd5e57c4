use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Log verbosity comes from `RUST_LOG`; with nothing set, the service logs
/// at `info`. Called once at startup, before any state is built, so store
/// and allocator initialization is captured too.
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
