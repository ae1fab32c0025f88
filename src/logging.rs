//! Tracing subscriber setup for the `botdeck` binary.

use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::LoggingConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Resolve the log filter: `BOTDECK_LOG`, then `RUST_LOG`, then the configured
/// level (`debug` when verbose). An unparsable directive falls back to `info`.
pub fn build_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("BOTDECK_LOG") {
        return filter;
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = if verbose { "debug" } else { config.level.as_str() };
    match level.parse::<EnvFilter>() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!(
                "WARN: logging.level '{}' is not a valid tracing filter ({}); falling back to 'info'",
                level, e
            );
            EnvFilter::new("info")
        }
    }
}

/// Build the subscriber without installing it. Stderr and the optional
/// daily-rolling file under `log_dir` are separate layers, so the file never
/// receives ANSI colour codes while stderr keeps them.
pub fn subscriber(
    config: &LoggingConfig,
    verbose: bool,
    log_dir: &Path,
) -> (impl Subscriber + Send + Sync + 'static, Option<WorkerGuard>) {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let stderr_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
    layers.push(if config.json {
        stderr_layer.json().boxed()
    } else {
        stderr_layer.boxed()
    });

    let guard = if config.file {
        let appender = tracing_appender::rolling::daily(log_dir, "botdeck.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer);
        layers.push(if config.json {
            file_layer.json().boxed()
        } else {
            file_layer.boxed()
        });
        Some(guard)
    } else {
        None
    };

    let filter = build_filter(config, verbose);
    (
        tracing_subscriber::registry().with(layers.with_filter(filter)),
        guard,
    )
}

/// Install the global subscriber. Logs go to stderr so command output on stdout
/// stays machine-readable. Keep the returned guard alive until exit so the
/// background file writer flushes.
pub fn init(config: &LoggingConfig, verbose: bool, log_dir: &Path) -> Option<WorkerGuard> {
    let (subscriber, guard) = subscriber(config, verbose, log_dir);

    if let Err(e) = subscriber.try_init() {
        eprintln!("WARN: tracing subscriber already installed: {}", e);
    }

    guard
}
