use monitor_core::{Alert, AlertDispatcher};
use tokio::sync::broadcast;

/// Fans alerts out to in-process subscribers over a broadcast channel.
///
/// `send` fails only when no receiver is listening; for a fire-and-forget
/// dispatcher that is not an error worth reporting.
pub struct ChannelDispatcher {
    tx: broadcast::Sender<Alert>,
}

impl ChannelDispatcher {
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<Alert>) {
        let (tx, rx) = broadcast::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Alert> {
        self.tx.subscribe()
    }
}

impl AlertDispatcher for ChannelDispatcher {
    fn dispatch(&self, alert: Alert) {
        let _ = self.tx.send(alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_core::SignalKind;

    #[tokio::test]
    async fn subscribers_see_dispatched_alerts() {
        let (dispatcher, mut rx) = ChannelDispatcher::new(16);
        dispatcher.dispatch(Alert::for_kind(SignalKind::Pressure, 5, "Critical Blood Pressure", 9));

        let alert = rx.recv().await.unwrap();
        assert_eq!(alert.patient_id, 5);
        assert_eq!(alert.condition, "Critical Blood Pressure");
    }

    #[test]
    fn dispatch_without_receivers_is_a_no_op() {
        let (dispatcher, rx) = ChannelDispatcher::new(16);
        drop(rx);
        dispatcher.dispatch(Alert::bare(1, "Manual Check", 1));
    }
}
