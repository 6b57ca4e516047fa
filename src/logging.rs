use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Sets up tracing with a human-readable console layer and a JSON file
/// layer under `logs/`, rotated daily. Scrape runs are short-lived, so the
/// appender guard is leaked rather than threaded back to `main`.
pub fn init_logging() {
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "moondash.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::from_default_env().add_directive("moondash=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    std::mem::forget(guard);
}
