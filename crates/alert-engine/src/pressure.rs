use crate::strategy::DetectionStrategy;
use monitor_core::{Alert, SignalKind, VitalRecord};

/// Step two consecutive readings must exceed before they count toward a trend.
const TREND_STEP: i32 = 10;

/// Blood pressure detection: critical thresholds on each reading plus
/// rising/falling trends over three consecutive readings.
#[derive(Debug, Default)]
pub struct PressureStrategy;

/// Parse a `sys/dia` payload. Exactly two integer parts; anything else is
/// malformed and the record is skipped.
pub(crate) fn parse_pair(value: &str) -> Option<(i32, i32)> {
    let mut parts = value.split('/');
    let sys = parts.next()?.trim().parse().ok()?;
    let dia = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((sys, dia))
}

impl DetectionStrategy for PressureStrategy {
    fn kind(&self) -> SignalKind {
        SignalKind::Pressure
    }

    fn evaluate(&self, patient_id: u32, records: &[VitalRecord], now_ms: i64) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let mut systolics = Vec::new();
        let mut diastolics = Vec::new();

        for record in records {
            // One bad record never aborts the rest of the batch.
            let Some((sys, dia)) = parse_pair(&record.value) else {
                continue;
            };

            if sys > 180 || sys < 90 || dia > 120 || dia < 60 {
                alerts.push(Alert::for_kind(
                    SignalKind::Pressure,
                    patient_id,
                    "Critical Blood Pressure",
                    record.timestamp,
                ));
            }

            systolics.push(sys);
            diastolics.push(dia);
        }

        // Series are kept in encounter order, not re-sorted.
        check_trend(&mut alerts, patient_id, &systolics, "Systolic BP", now_ms);
        check_trend(&mut alerts, patient_id, &diastolics, "Diastolic BP", now_ms);

        alerts
    }
}

/// Sliding window of width 3 over the series; overlapping triples each raise
/// their own alert. A trend describes the series, not a single reading, so
/// the alert is stamped with the evaluation wall clock.
fn check_trend(alerts: &mut Vec<Alert>, patient_id: u32, values: &[i32], label: &str, now_ms: i64) {
    for w in values.windows(3) {
        let rising = w[1] - w[0] > TREND_STEP && w[2] - w[1] > TREND_STEP;
        let falling = w[0] - w[1] > TREND_STEP && w[1] - w[2] > TREND_STEP;

        if rising || falling {
            let direction = if rising { "Rising" } else { "Falling" };
            alerts.push(Alert::for_kind(
                SignalKind::Pressure,
                patient_id,
                format!("{direction} {label} Trend"),
                now_ms,
            ));
        }
    }
}
