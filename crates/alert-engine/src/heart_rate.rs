use crate::strategy::DetectionStrategy;
use monitor_core::{Alert, SignalKind, VitalRecord};

const LOW_BPM: f64 = 50.0;
const HIGH_BPM: f64 = 120.0;

/// Heart rate detection: plain low/high bounds per reading.
#[derive(Debug, Default)]
pub struct HeartRateStrategy;

impl DetectionStrategy for HeartRateStrategy {
    fn kind(&self) -> SignalKind {
        SignalKind::HeartRate
    }

    fn evaluate(&self, patient_id: u32, records: &[VitalRecord], _now_ms: i64) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for record in records {
            let Ok(bpm) = record.value.trim().parse::<f64>() else {
                continue;
            };

            // A reading is low or high, never both.
            if bpm < LOW_BPM {
                alerts.push(Alert::for_kind(
                    SignalKind::HeartRate,
                    patient_id,
                    "Low Heart Rate",
                    record.timestamp,
                ));
            } else if bpm > HIGH_BPM {
                alerts.push(Alert::for_kind(
                    SignalKind::HeartRate,
                    patient_id,
                    "High Heart Rate",
                    record.timestamp,
                ));
            }
        }

        alerts
    }
}
