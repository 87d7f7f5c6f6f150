use monitor_core::VitalRecord;
use std::collections::HashMap;

/// Partition a patient's window into per-signal groups, keyed by the
/// lowercased tag. Tags with no registered strategy stay in the map so the
/// partition is complete; the evaluator just never visits them.
pub fn classify(records: &[VitalRecord]) -> HashMap<String, Vec<VitalRecord>> {
    let mut groups: HashMap<String, Vec<VitalRecord>> = HashMap::new();
    for record in records {
        groups
            .entry(record.signal_type.trim().to_lowercase())
            .or_default()
            .push(record.clone());
    }
    groups
}
