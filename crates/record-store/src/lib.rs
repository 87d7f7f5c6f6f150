use dashmap::DashMap;
use monitor_core::{RecordSource, VitalRecord};

/// In-memory store of vital-sign records keyed by patient id.
///
/// Ingestion writes and evaluation reads share this through an `Arc`. The
/// per-key locking in `DashMap` gives last-write-visible inserts and a
/// consistent snapshot per patient; no cross-patient atomicity is needed
/// because every evaluation reads a single patient's slice.
#[derive(Default)]
pub struct RecordStore {
    records: DashMap<u32, Vec<VitalRecord>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one measurement. Records are insert-only; nothing is mutated
    /// or evicted until [`RecordStore::clear`].
    pub fn add_record(&self, patient_id: u32, value: &str, signal_type: &str, timestamp: i64) {
        self.insert(VitalRecord::new(patient_id, signal_type, value, timestamp));
    }

    pub fn insert(&self, record: VitalRecord) {
        self.records.entry(record.patient_id).or_default().push(record);
    }

    /// Ids of every patient with at least one record.
    pub fn patient_ids(&self) -> Vec<u32> {
        self.records.iter().map(|entry| *entry.key()).collect()
    }

    pub fn record_count(&self, patient_id: u32) -> usize {
        self.records.get(&patient_id).map(|r| r.len()).unwrap_or(0)
    }

    /// Drop all patients. Mainly for tests.
    pub fn clear(&self) {
        self.records.clear();
    }
}

impl RecordSource for RecordStore {
    fn query_window(&self, patient_id: u32, start: i64, end: i64) -> Vec<VitalRecord> {
        match self.records.get(&patient_id) {
            Some(records) => records
                .iter()
                .filter(|r| r.timestamp >= start && r.timestamp <= end)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds_are_inclusive() {
        let store = RecordStore::new();
        store.add_record(1, "80", "HeartRate", 100);
        store.add_record(1, "81", "HeartRate", 200);
        store.add_record(1, "82", "HeartRate", 300);

        let window = store.query_window(1, 100, 200);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].value, "80");
        assert_eq!(window[1].value, "81");
    }

    #[test]
    fn unknown_patient_returns_empty() {
        let store = RecordStore::new();
        assert!(store.query_window(42, 0, i64::MAX).is_empty());
    }

    #[test]
    fn records_are_kept_per_patient() {
        let store = RecordStore::new();
        store.add_record(1, "97%", "Saturation", 100);
        store.add_record(2, "95%", "Saturation", 100);

        assert_eq!(store.record_count(1), 1);
        assert_eq!(store.record_count(2), 1);
        assert_eq!(store.query_window(1, 0, 1000).len(), 1);

        let mut ids = store.patient_ids();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn clear_empties_the_store() {
        let store = RecordStore::new();
        store.add_record(1, "120/80", "BloodPressure", 100);
        store.clear();
        assert!(store.patient_ids().is_empty());
        assert_eq!(store.record_count(1), 0);
    }
}
