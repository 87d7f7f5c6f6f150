use monitor_core::{Alert, AlertDispatcher, MonitorError};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Appends one JSON line per alert to a log file.
///
/// Dispatch is fire and forget, so write failures are logged and swallowed
/// rather than surfaced to the evaluation path.
pub struct FileDispatcher {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileDispatcher {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, MonitorError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }
}

impl AlertDispatcher for FileDispatcher {
    fn dispatch(&self, alert: Alert) {
        let line = match serde_json::to_string(&alert) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("failed to serialize alert: {e}");
                return;
            }
        };

        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(file, "{line}") {
            tracing::error!("failed to write alert to {}: {e}", self.path.display());
        }
    }
}
