//! Logging to standard output and optionally to a file.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use tn_conf::LogConf;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Events are written to standard output and, if a log directory is
/// configured, to a new file in that directory. The file writer is active
/// only until the returned guard is dropped.
pub fn init(conf: &LogConf) -> Result<Option<WorkerGuard>, SetGlobalDefaultError> {
    let (file_layer, guard) = match conf.directory() {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::never(
                directory,
                file_name(chrono::Local::now().naive_local()),
            );
            let (non_blocking_log_writer, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(non_blocking_log_writer),
                ),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let collector = tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                // RUST_LOG takes precedence over the configured level
                .with_default_directive(conf.level().into())
                .from_env_lossy(),
        )
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(file_layer);
    tracing::subscriber::set_global_default(collector)?;

    Ok(guard)
}

fn file_name(time: NaiveDateTime) -> PathBuf {
    time.format("%Y-%m-%d_%H-%M-%S.log").to_string().into()
}
