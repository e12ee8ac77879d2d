use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CHARFREQ_LOG";

/// Stderr subscriber filtered by `CHARFREQ_LOG`, `info` when unset.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
