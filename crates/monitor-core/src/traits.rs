use crate::{Alert, VitalRecord};

/// Range query into whatever holds patient records. Results are not
/// guaranteed to be time-ordered; callers that need order sort themselves.
pub trait RecordSource: Send + Sync {
    /// All records for one patient with `start <= timestamp <= end`.
    fn query_window(&self, patient_id: u32, start: i64, end: i64) -> Vec<VitalRecord>;
}

/// Receives finished alerts. Fire and forget: called synchronously once per
/// produced alert, with no delivery guarantee beyond that.
pub trait AlertDispatcher: Send + Sync {
    fn dispatch(&self, alert: Alert);
}
