use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

const FILE_PREFIX: &str = "app";
const FILE_SUFFIX: &str = "log";

// Daily file the appender writes for `date` (the appender rolls on UTC days)
pub fn log_file_for(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.{}.{}", FILE_PREFIX, date.format("%Y-%m-%d"), FILE_SUFFIX))
}

pub fn current_log_file(dir: &Path) -> PathBuf {
    log_file_for(dir, Utc::now().date_naive())
}

// stdout + daily rotating file under `dir`. Keep the guard alive or buffered
// lines are lost.
pub fn build_dispatch(dir: &Path, filter: EnvFilter) -> anyhow::Result<(Dispatch, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(FILE_PREFIX)
        .filename_suffix(FILE_SUFFIX)
        .build(dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false));

    Ok((Dispatch::new(subscriber), guard))
}

// Install globally. RUST_LOG wins over `level` when set.
pub fn init(dir: &Path, level: &str) -> anyhow::Result<WorkerGuard> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };
    let (dispatch, guard) = build_dispatch(dir, filter)?;
    tracing::dispatcher::set_global_default(dispatch)?;
    Ok(guard)
}
