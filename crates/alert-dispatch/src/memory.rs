use monitor_core::{Alert, AlertDispatcher};
use std::sync::Mutex;

/// Collects every dispatched alert in memory. Test double.
#[derive(Debug, Default)]
pub struct MemoryDispatcher {
    alerts: Mutex<Vec<Alert>>,
}

impl MemoryDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything received so far.
    pub fn take(&self) -> Vec<Alert> {
        let mut alerts = match self.alerts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::take(&mut *alerts)
    }

    pub fn len(&self) -> usize {
        match self.alerts.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertDispatcher for MemoryDispatcher {
    fn dispatch(&self, alert: Alert) {
        let mut alerts = match self.alerts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        alerts.push(alert);
    }
}
