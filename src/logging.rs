use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,islemler_api=debug,tower_http=info";

/// Console output plus a daily-rolling file under `log_dir`.
///
/// The returned guard flushes the file writer on drop and must live until
/// shutdown.
pub fn init(log_dir: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, "log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_thread_ids(true))
        .with(fmt::layer().with_ansi(false).with_thread_ids(true).with_writer(file_writer))
        .init();

    guard
}
