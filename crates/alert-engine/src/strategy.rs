use monitor_core::{Alert, SignalKind, VitalRecord};

/// One detection algorithm over a single signal's slice of a patient window.
///
/// Strategies are pure: no state survives between calls and every rule is
/// recomputed from the records passed in. Alerts come back in production
/// order; the evaluator forwards them to the dispatcher as-is.
pub trait DetectionStrategy: Send + Sync {
    /// The signal this strategy evaluates. Keys the registry.
    fn kind(&self) -> SignalKind;

    /// Evaluate one window slice. `now_ms` is the evaluation wall clock,
    /// used by rules that describe the series rather than a single reading.
    fn evaluate(&self, patient_id: u32, records: &[VitalRecord], now_ms: i64) -> Vec<Alert>;
}
