use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file when no path is given explicitly.
pub const LOG_ENV: &str = "MENU_ENGINE_LOG";

/// Where logs should go: the explicit path if any, else `$MENU_ENGINE_LOG`.
pub fn log_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LOG_ENV).map(PathBuf::from))
}

/// Initialize tracing into a log file.
///
/// Logging is off unless a path is configured: the menu owns the terminal and
/// log lines would interleave with it. The filter comes from `RUST_LOG` and
/// defaults to `info`.
pub fn init_tracing(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_path(path) else {
        return Ok(());
    };

    let file = File::create(&path)
        .map_err(|e| anyhow::anyhow!("can't create log file {}: {}", path.display(), e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;
    Ok(())
}
