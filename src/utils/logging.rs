use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "chefbot.log";

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(enable_logging: bool) -> &'static str {
    if enable_logging {
        "chefbot=debug,warn"
    } else {
        "chefbot=error,error"
    }
}

/// Initialize tracing to log to a file (not the terminal, which belongs to
/// the conversation).
pub fn init_tracing(log_dir: &Path, enable_logging: bool) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(enable_logging))),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|err| -> Box<dyn Error> { err })?;

    Ok(())
}
