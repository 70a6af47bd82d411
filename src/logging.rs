use crate::constants::LOG_DIR_VAR;
use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes logging on stderr, so stdout carries only the report.
///
/// When `MOVIE_RATINGS_LOG_DIR` is set, a daily-rolling JSON log is written there too.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "movie_ratings=debug"
    } else {
        "movie_ratings=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file_layer = std::env::var(LOG_DIR_VAR).ok().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        let file_appender = tracing_appender::rolling::daily(&dir, "movie_ratings.log");
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
        // Keep the guard alive for the life of the process so logs are flushed on exit
        std::mem::forget(guard);
        Some(fmt::layer().json().with_writer(non_blocking_writer))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();
}
