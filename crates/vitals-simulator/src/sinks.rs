use dashmap::DashMap;
use record_store::RecordStore;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where generated readings go. Implementations are pure I/O; emission
/// failures are logged, never propagated back to the generator loop.
pub trait OutputSink: Send + Sync {
    fn emit(&self, patient_id: u32, timestamp: i64, label: &str, value: &str);
}

/// The wire line format shared with the live feed:
/// `patientId|label|value|timestamp`.
pub fn format_wire_line(patient_id: u32, timestamp: i64, label: &str, value: &str) -> String {
    format!("{patient_id}|{label}|{value}|{timestamp}")
}

/// Logs each reading. Demo sink.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn emit(&self, patient_id: u32, timestamp: i64, label: &str, value: &str) {
        tracing::info!("{}", format_wire_line(patient_id, timestamp, label, value));
    }
}

/// One `{label}.txt` per signal under a base directory, append-only.
/// The path per label is computed once and cached.
pub struct FileSink {
    base_dir: PathBuf,
    paths: DashMap<String, PathBuf>,
}

impl FileSink {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            paths: DashMap::new(),
        }
    }
}

impl OutputSink for FileSink {
    fn emit(&self, patient_id: u32, timestamp: i64, label: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base_dir) {
            tracing::error!("failed to create {}: {e}", self.base_dir.display());
            return;
        }

        let path = self
            .paths
            .entry(label.to_string())
            .or_insert_with(|| self.base_dir.join(format!("{label}.txt")))
            .clone();

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| {
                writeln!(
                    file,
                    "Patient ID: {patient_id}, Timestamp: {timestamp}, Label: {label}, Data: {value}"
                )
            });
        if let Err(e) = result {
            tracing::error!("failed to write to {}: {e}", path.display());
        }
    }
}

/// Writes straight into the record store so evaluation sees the data without
/// a network hop in between.
pub struct StoreSink {
    store: Arc<RecordStore>,
}

impl StoreSink {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl OutputSink for StoreSink {
    fn emit(&self, patient_id: u32, timestamp: i64, label: &str, value: &str) {
        self.store.add_record(patient_id, value, label, timestamp);
    }
}
