use crate::strategy::DetectionStrategy;
use monitor_core::{Alert, SignalKind, VitalRecord};

/// Readings below this percentage are low saturation.
const LOW_THRESHOLD: f64 = 92.0;
/// Any drop of at least this much between an earlier and a later reading is
/// a rapid drop.
const DROP_THRESHOLD: f64 = 5.0;

/// Oxygen saturation detection: low absolute readings plus rapid drops
/// between any earlier and later reading in the window.
#[derive(Debug, Default)]
pub struct SaturationStrategy;

/// Parse a `"97%"`-style payload: trimmed, optional trailing `%`.
pub(crate) fn parse_percent(value: &str) -> Option<f64> {
    value.trim().trim_end_matches('%').trim().parse().ok()
}

impl DetectionStrategy for SaturationStrategy {
    fn kind(&self) -> SignalKind {
        SignalKind::Saturation
    }

    fn evaluate(&self, patient_id: u32, records: &[VitalRecord], _now_ms: i64) -> Vec<Alert> {
        // Input order is not reliable; the drop check needs time order.
        let mut readings: Vec<(i64, f64)> = records
            .iter()
            .filter_map(|r| parse_percent(&r.value).map(|v| (r.timestamp, v)))
            .collect();
        readings.sort_by_key(|&(ts, _)| ts);

        let mut alerts = Vec::new();

        for (i, &(timestamp, value)) in readings.iter().enumerate() {
            if value < LOW_THRESHOLD {
                alerts.push(Alert::for_kind(
                    SignalKind::Saturation,
                    patient_id,
                    "Low Saturation",
                    timestamp,
                ));
            }

            // All later readings, not just the adjacent one: a single early
            // high value pairs with every later low reading. Over-triggers
            // on purpose; sensitivity beats precision here.
            for &(later_ts, later) in &readings[i + 1..] {
                if value - later >= DROP_THRESHOLD {
                    alerts.push(Alert::for_kind(
                        SignalKind::Saturation,
                        patient_id,
                        "Rapid Saturation Drop",
                        later_ts,
                    ));
                }
            }
        }

        alerts
    }
}
