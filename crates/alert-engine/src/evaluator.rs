use crate::cardiac::CardiacRhythmStrategy;
use crate::classify::classify;
use crate::correlate::check_hypotensive_hypoxemia;
use crate::heart_rate::HeartRateStrategy;
use crate::pressure::PressureStrategy;
use crate::saturation::SaturationStrategy;
use crate::strategy::DetectionStrategy;
use chrono::Utc;
use monitor_core::{AlertDispatcher, RecordSource, SignalKind, VitalRecord};
use std::collections::HashMap;
use std::sync::Arc;

/// Trailing window each evaluation reads: 10 minutes.
pub const WINDOW_MS: i64 = 10 * 60 * 1000;

/// Per-patient evaluation orchestrator.
///
/// Pulls the trailing window, partitions it by signal, runs every registered
/// strategy plus the cross-signal correlator, and forwards each produced
/// alert to the dispatcher in production order. Holds no state between
/// calls, so evaluations for different patients can run concurrently.
pub struct AlertEvaluator {
    store: Arc<dyn RecordSource>,
    dispatcher: Arc<dyn AlertDispatcher>,
    /// Fixed at construction. A signal with no entry is silently skipped.
    strategies: HashMap<SignalKind, Box<dyn DetectionStrategy>>,
}

/// The standard registry: one strategy per known signal kind.
pub fn default_registry() -> Vec<Box<dyn DetectionStrategy>> {
    vec![
        Box::new(PressureStrategy),
        Box::new(SaturationStrategy),
        Box::new(CardiacRhythmStrategy),
        Box::new(HeartRateStrategy),
    ]
}

impl AlertEvaluator {
    pub fn new(store: Arc<dyn RecordSource>, dispatcher: Arc<dyn AlertDispatcher>) -> Self {
        Self::with_strategies(store, dispatcher, default_registry())
    }

    pub fn with_strategies(
        store: Arc<dyn RecordSource>,
        dispatcher: Arc<dyn AlertDispatcher>,
        strategies: Vec<Box<dyn DetectionStrategy>>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            strategies: strategies.into_iter().map(|s| (s.kind(), s)).collect(),
        }
    }

    /// One evaluation pass over the patient's trailing 10-minute window.
    pub fn evaluate_patient(&self, patient_id: u32) {
        self.evaluate_at(patient_id, Utc::now().timestamp_millis());
    }

    /// Evaluation pinned to an explicit wall clock. Tests drive this
    /// directly so windows and trend timestamps are deterministic.
    pub fn evaluate_at(&self, patient_id: u32, now_ms: i64) {
        let records = self.store.query_window(patient_id, now_ms - WINDOW_MS, now_ms);
        if records.is_empty() {
            return;
        }
        tracing::debug!(patient_id, records = records.len(), "evaluating window");

        let groups = classify(&records);

        for (tag, slice) in &groups {
            // Unknown tags stay in the partition but are never evaluated.
            let Some(kind) = SignalKind::from_tag(tag) else {
                continue;
            };
            let Some(strategy) = self.strategies.get(&kind) else {
                continue;
            };
            for alert in strategy.evaluate(patient_id, slice, now_ms) {
                self.dispatcher.dispatch(alert);
            }
        }

        let empty = Vec::new();
        let pressure = group(&groups, SignalKind::Pressure, &empty);
        let saturation = group(&groups, SignalKind::Saturation, &empty);
        if let Some(alert) = check_hypotensive_hypoxemia(patient_id, pressure, saturation) {
            self.dispatcher.dispatch(alert);
        }
    }
}

fn group<'a>(
    groups: &'a HashMap<String, Vec<VitalRecord>>,
    kind: SignalKind,
    empty: &'a Vec<VitalRecord>,
) -> &'a Vec<VitalRecord> {
    groups.get(kind.tag()).unwrap_or(empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_dispatch::MemoryDispatcher;
    use monitor_core::AlertKind;
    use record_store::RecordStore;

    fn setup() -> (Arc<RecordStore>, Arc<MemoryDispatcher>, AlertEvaluator) {
        let store = Arc::new(RecordStore::new());
        let dispatcher = Arc::new(MemoryDispatcher::new());
        let evaluator = AlertEvaluator::new(store.clone(), dispatcher.clone());
        (store, dispatcher, evaluator)
    }

    #[test]
    fn one_window_exercises_every_strategy() {
        let (store, dispatcher, evaluator) = setup();
        let now = 10_000_000;
        let patient = 1;

        // Low saturation plus a rapid 8-point drop.
        store.add_record(patient, "97%", "saturation", now - 5000);
        store.add_record(patient, "89%", "saturation", now);

        // Critical reading plus a rising systolic trend.
        store.add_record(patient, "100/70", "bloodpressure", now - 9000);
        store.add_record(patient, "115/75", "bloodpressure", now - 6000);
        store.add_record(patient, "130/80", "bloodpressure", now - 3000);
        store.add_record(patient, "190/130", "bloodpressure", now);

        // Abnormal ECG spike over a flat baseline.
        store.add_record(patient, "0.5", "ecg", now - 50_000);
        store.add_record(patient, "0.6", "ecg", now - 40_000);
        store.add_record(patient, "0.5", "ecg", now - 30_000);
        store.add_record(patient, "0.6", "ecg", now - 20_000);
        store.add_record(patient, "1.2", "ecg", now);

        // One high and one low heart rate reading.
        store.add_record(patient, "150", "heartrate", now - 1000);
        store.add_record(patient, "25", "heartrate", now);

        evaluator.evaluate_at(patient, now);

        let alerts = dispatcher.take();
        assert!(!alerts.is_empty());

        let conditions: Vec<&str> = alerts.iter().map(|a| a.condition.as_str()).collect();
        for expected in [
            "Low Saturation",
            "Rapid Saturation Drop",
            "Critical Blood Pressure",
            "Rising Systolic BP Trend",
            "Abnormal ECG Peak",
            "Low Heart Rate",
            "High Heart Rate",
        ] {
            assert!(conditions.contains(&expected), "missing {expected}");
        }

        // No strategy-produced alert is ever generic, and each carries its
        // signal's default priority.
        for alert in &alerts {
            assert_ne!(alert.kind, AlertKind::Generic);
            assert!(alert.priority >= 1);
            assert_eq!(alert.patient_id, patient);
        }
    }

    #[test]
    fn correlated_alert_fires_exactly_once() {
        let (store, dispatcher, evaluator) = setup();
        let now = 1_000_000;

        store.add_record(7, "85/60", "bloodpressure", now - 2000);
        store.add_record(7, "80/55", "bloodpressure", now - 1000);
        store.add_record(7, "89%", "saturation", now - 1500);
        store.add_record(7, "88%", "saturation", now - 500);

        evaluator.evaluate_at(7, now);

        let correlated: Vec<_> = dispatcher
            .take()
            .into_iter()
            .filter(|a| a.condition == "Hypotensive Hypoxemia")
            .collect();
        assert_eq!(correlated.len(), 1);
    }

    #[test]
    fn records_outside_the_window_are_ignored() {
        let (store, dispatcher, evaluator) = setup();
        let now = WINDOW_MS * 10;

        store.add_record(1, "150", "heartrate", now - WINDOW_MS - 1);
        evaluator.evaluate_at(1, now);
        assert!(dispatcher.take().is_empty());

        store.add_record(1, "150", "heartrate", now - WINDOW_MS);
        evaluator.evaluate_at(1, now);
        assert_eq!(dispatcher.take().len(), 1);
    }

    #[test]
    fn unknown_signal_types_are_silently_skipped() {
        let (store, dispatcher, evaluator) = setup();
        let now = 1_000_000;

        store.add_record(1, "999", "cholesterol", now);
        evaluator.evaluate_at(1, now);
        assert!(dispatcher.take().is_empty());
    }

    #[test]
    fn empty_registry_still_runs_the_correlator() {
        let store = Arc::new(RecordStore::new());
        let dispatcher = Arc::new(MemoryDispatcher::new());
        let evaluator =
            AlertEvaluator::with_strategies(store.clone(), dispatcher.clone(), Vec::new());
        let now = 1_000_000;

        store.add_record(1, "85/60", "bloodpressure", now - 100);
        store.add_record(1, "89%", "saturation", now);

        evaluator.evaluate_at(1, now);

        let alerts = dispatcher.take();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].condition, "Hypotensive Hypoxemia");
    }

    #[test]
    fn trend_alerts_carry_the_evaluation_clock() {
        let (store, dispatcher, evaluator) = setup();
        let now = 2_000_000;

        store.add_record(1, "100/70", "bloodpressure", now - 3000);
        store.add_record(1, "115/70", "bloodpressure", now - 2000);
        store.add_record(1, "130/70", "bloodpressure", now - 1000);

        evaluator.evaluate_at(1, now);

        let alerts = dispatcher.take();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].condition, "Rising Systolic BP Trend");
        assert_eq!(alerts[0].timestamp, now);
    }
}
