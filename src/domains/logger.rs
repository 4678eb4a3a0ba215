use chrono::Utc;
use log::{error as log_error, info as log_info, warn as log_warn};
use std::path::Path;
use std::sync::Arc;

/// Port for user-facing notices from the views and reporters (saved files,
/// batch progress). Diagnostics go through `tracing` instead.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);

    fn figure_saved(&self, path: &Path) {
        self.info(&format!("Visualization saved to [{}]", path.display()));
    }
}

pub type DynLogger = Arc<dyn DomainLogger>;

/// Writes timestamped notices to a file through `fast_log`.
pub struct FileLogger;

impl FileLogger {
    /// Install the global `fast_log` file sink. No console appender: stdout
    /// belongs to the `tracing` subscriber and the comparison table, and
    /// `init_logger` pairs this logger with the console one instead.
    pub fn init(path: &str) -> Result<(), Box<dyn std::error::Error>> {
        fast_log::init(
            fast_log::config::Config::new()
                .file(path)
                .level(log::LevelFilter::Info),
        )?;
        Ok(())
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        log_info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log_warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log_error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}
