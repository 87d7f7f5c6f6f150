use crate::strategy::DetectionStrategy;
use monitor_core::{Alert, SignalKind, VitalRecord};

/// Minimum records before the window mean is a usable baseline.
const MIN_BASELINE: usize = 5;
/// A reading this far above the window mean counts as a peak.
const PEAK_RATIO: f64 = 1.3;

/// ECG peak detection: flags readings that stand out against the mean of the
/// current window. Nothing is kept between calls; every evaluation recomputes
/// the mean from scratch.
#[derive(Debug, Default)]
pub struct CardiacRhythmStrategy;

impl DetectionStrategy for CardiacRhythmStrategy {
    fn kind(&self) -> SignalKind {
        SignalKind::CardiacRhythm
    }

    fn evaluate(&self, patient_id: u32, records: &[VitalRecord], _now_ms: i64) -> Vec<Alert> {
        if records.len() < MIN_BASELINE {
            return Vec::new();
        }

        // Unparseable values count as 0.0 and stay in the mean. They drag the
        // average down instead of shrinking the sample; preserved as-is.
        let values: Vec<f64> = records
            .iter()
            .map(|r| r.value.trim().parse().unwrap_or(0.0))
            .collect();

        let mean = values.iter().sum::<f64>() / values.len() as f64;

        records
            .iter()
            .zip(&values)
            .filter(|&(_, &value)| value > mean * PEAK_RATIO)
            .map(|(record, _)| {
                Alert::for_kind(
                    SignalKind::CardiacRhythm,
                    patient_id,
                    "Abnormal ECG Peak",
                    record.timestamp,
                )
            })
            .collect()
    }
}
