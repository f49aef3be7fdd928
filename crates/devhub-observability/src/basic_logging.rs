use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the console filter shared by every logging setup.
///
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` (default "info") applies to
/// the DevHub crates and noisy dependencies are held at warn.
pub(crate) fn console_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "devhub={level},devhub_core={level},devhub_auth={level},devhub_observability={level},devhub_cli={level},audit=info,tower_http=warn,hyper=warn,tonic=warn,h2=warn",
            level = log_level
        ))
    })
}

/// Initialize console-only logging.
///
/// Used when observability is disabled at runtime or not compiled in, and by
/// the CLI.
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_filter());

    // try_init: a second initialisation (tests, CLI reuse) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
