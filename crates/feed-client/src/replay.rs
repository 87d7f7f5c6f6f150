//! Replay ingestion: loads previously written per-signal `.txt` files back
//! into the store. The counterpart of the simulator's file sink.

use monitor_core::{MonitorError, VitalRecord};
use record_store::RecordStore;
use std::path::{Path, PathBuf};

/// Parse one replayed line:
/// `Patient ID: 3, Timestamp: 1714376789051, Label: Saturation, Data: 98%`.
/// Any `%` in the data field is stripped before storage.
pub fn parse_replay_line(line: &str) -> Result<VitalRecord, MonitorError> {
    let line = line.trim();
    let parts: Vec<&str> = line.split(", ").collect();

    if parts.len() != 4 {
        return Err(MonitorError::InvalidData(format!(
            "expected 4 fields, got {}: {line}",
            parts.len()
        )));
    }

    let patient_id: u32 = field(parts[0])
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| MonitorError::InvalidData(format!("bad patient id: {line}")))?;
    let timestamp: i64 = field(parts[1])
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| MonitorError::InvalidData(format!("bad timestamp: {line}")))?;
    let label = field(parts[2])
        .ok_or_else(|| MonitorError::InvalidData(format!("missing label: {line}")))?;
    let value = field(parts[3])
        .ok_or_else(|| MonitorError::InvalidData(format!("missing data: {line}")))?
        .replace('%', "");

    Ok(VitalRecord::new(
        patient_id,
        label.trim(),
        value.trim(),
        timestamp,
    ))
}

/// The part after `"Name: "` in one comma-separated field.
fn field(part: &str) -> Option<&str> {
    part.split_once(": ").map(|(_, value)| value)
}

/// Reads every `.txt` file in a directory into the record store.
///
/// One malformed line is skipped with a warning and never costs its
/// neighbors; an unreadable file is skipped the same way. Only a missing
/// or unlistable directory is an error.
pub struct FileReplayReader {
    dir: PathBuf,
}

impl FileReplayReader {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load everything, returning the number of records stored.
    pub fn read_into(&self, store: &RecordStore) -> Result<usize, MonitorError> {
        let mut loaded = 0;

        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }

            let contents = match std::fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::warn!("failed to read {}: {e}", path.display());
                    continue;
                }
            };

            for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                match parse_replay_line(line) {
                    Ok(record) => {
                        store.insert(record);
                        loaded += 1;
                    }
                    Err(e) => tracing::warn!("skipping replay line: {e}"),
                }
            }
        }

        tracing::info!("replayed {loaded} records from {}", self.dir.display());
        Ok(loaded)
    }
}
