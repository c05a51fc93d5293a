use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays reserved for resolutions and bridge responses.
pub fn init(log_level: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(log_level, env.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// RUST_LOG wins over --log-level when it parses.
fn filter_for(log_level: &str, env: Option<&str>) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(log_level))
}
