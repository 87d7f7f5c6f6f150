use monitor_core::{Alert, AlertDispatcher};

/// Writes each alert to the log. The demo and debugging channel.
#[derive(Debug, Default)]
pub struct ConsoleDispatcher;

impl AlertDispatcher for ConsoleDispatcher {
    fn dispatch(&self, alert: Alert) {
        tracing::warn!(
            patient_id = alert.patient_id,
            kind = alert.kind.tag(),
            priority = alert.priority,
            "ALERT for patient {}: {} at {}",
            alert.patient_id,
            alert.condition,
            alert.timestamp
        );
    }
}
