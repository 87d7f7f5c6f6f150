use rand::Rng;
use std::collections::HashMap;

/// Produces the next synthetic reading for a patient.
pub trait VitalGenerator: Send {
    /// Wire label for this signal (e.g. "Saturation").
    fn label(&self) -> &'static str;

    /// Next encoded value for this patient, or `None` when the signal has
    /// nothing to report this tick.
    fn generate(&mut self, patient_id: u32) -> Option<String>;
}

/// SpO2 random walk: starts between 95 and 100, moves by at most one point
/// per reading, clamped to 90..=100. Emitted with a `%` suffix.
#[derive(Debug, Default)]
pub struct SaturationGenerator {
    last: HashMap<u32, i32>,
}

impl SaturationGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VitalGenerator for SaturationGenerator {
    fn label(&self) -> &'static str {
        "Saturation"
    }

    fn generate(&mut self, patient_id: u32) -> Option<String> {
        let mut rng = rand::thread_rng();
        let last = *self
            .last
            .entry(patient_id)
            .or_insert_with(|| rng.gen_range(95..=100));
        let next = (last + rng.gen_range(-1..=1)).clamp(90, 100);
        self.last.insert(patient_id, next);
        Some(format!("{next}%"))
    }
}

/// Uniform 45-135 bpm so both heart-rate bounds get exercised.
#[derive(Debug, Default)]
pub struct HeartRateGenerator;

impl HeartRateGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl VitalGenerator for HeartRateGenerator {
    fn label(&self) -> &'static str {
        "HeartRate"
    }

    fn generate(&mut self, _patient_id: u32) -> Option<String> {
        Some(rand::thread_rng().gen_range(45..=135).to_string())
    }
}

/// Blood pressure random walk around 120/80, wide enough to wander past the
/// critical thresholds. Emitted as `sys/dia`.
#[derive(Debug, Default)]
pub struct PressureGenerator {
    last: HashMap<u32, (i32, i32)>,
}

impl PressureGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VitalGenerator for PressureGenerator {
    fn label(&self) -> &'static str {
        "BloodPressure"
    }

    fn generate(&mut self, patient_id: u32) -> Option<String> {
        let mut rng = rand::thread_rng();
        let (sys, dia) = *self.last.entry(patient_id).or_insert_with(|| {
            (rng.gen_range(110..=130), rng.gen_range(70..=90))
        });
        let sys = (sys + rng.gen_range(-5..=5)).clamp(80, 195);
        let dia = (dia + rng.gen_range(-5..=5)).clamp(50, 130);
        self.last.insert(patient_id, (sys, dia));
        Some(format!("{sys}/{dia}"))
    }
}

/// ECG-like signal: baseline noise around 0.5 mV with an occasional spike
/// that the peak rule should catch.
#[derive(Debug, Default)]
pub struct CardiacRhythmGenerator;

impl CardiacRhythmGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl VitalGenerator for CardiacRhythmGenerator {
    fn label(&self) -> &'static str {
        "ECG"
    }

    fn generate(&mut self, _patient_id: u32) -> Option<String> {
        let mut rng = rand::thread_rng();
        let value = if rng.gen_bool(0.05) {
            rng.gen_range(1.0..1.5)
        } else {
            rng.gen_range(0.3..0.7)
        };
        Some(format!("{value:.2}"))
    }
}

/// Staff-triggered alert button, simulated. Each patient carries an
/// active flag: an inactive patient trips with probability `1 - e^(-0.1)`
/// per tick and emits `triggered`; an active one resolves with probability
/// 0.9 and emits `resolved`. Ticks without a transition emit nothing. The
/// engine has no strategy for the `Alert` label, so these records are
/// stored as-is for the audit trail.
#[derive(Debug, Default)]
pub struct ManualAlertGenerator {
    active: HashMap<u32, bool>,
}

impl ManualAlertGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VitalGenerator for ManualAlertGenerator {
    fn label(&self) -> &'static str {
        "Alert"
    }

    fn generate(&mut self, patient_id: u32) -> Option<String> {
        let mut rng = rand::thread_rng();
        let active = self.active.entry(patient_id).or_insert(false);
        if *active {
            if rng.gen_bool(0.9) {
                *active = false;
                return Some("resolved".to_string());
            }
        } else {
            let trigger_probability = -(-0.1f64).exp_m1();
            if rng.gen_bool(trigger_probability) {
                *active = true;
                return Some("triggered".to_string());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation_stays_in_range_and_keeps_its_suffix() {
        let mut gen = SaturationGenerator::new();
        for _ in 0..200 {
            let value = gen.generate(1).unwrap();
            let pct: i32 = value.strip_suffix('%').unwrap().parse().unwrap();
            assert!((90..=100).contains(&pct), "out of range: {value}");
        }
    }

    #[test]
    fn saturation_walks_per_patient() {
        let mut gen = SaturationGenerator::new();
        let first: i32 = gen.generate(1).unwrap().strip_suffix('%').unwrap().parse().unwrap();
        let second: i32 = gen.generate(1).unwrap().strip_suffix('%').unwrap().parse().unwrap();
        assert!((first - second).abs() <= 1);
    }

    #[test]
    fn heart_rate_covers_both_alert_bounds() {
        let mut gen = HeartRateGenerator::new();
        for _ in 0..100 {
            let bpm: i32 = gen.generate(1).unwrap().parse().unwrap();
            assert!((45..=135).contains(&bpm));
        }
    }

    #[test]
    fn pressure_emits_a_parseable_pair() {
        let mut gen = PressureGenerator::new();
        for _ in 0..100 {
            let value = gen.generate(1).unwrap();
            let (sys, dia) = value.split_once('/').unwrap();
            let sys: i32 = sys.parse().unwrap();
            let dia: i32 = dia.parse().unwrap();
            assert!((80..=195).contains(&sys));
            assert!((50..=130).contains(&dia));
        }
    }

    #[test]
    fn cardiac_values_are_numeric() {
        let mut gen = CardiacRhythmGenerator::new();
        for _ in 0..100 {
            let value: f64 = gen.generate(1).unwrap().parse().unwrap();
            assert!(value > 0.0 && value < 1.5);
        }
    }

    #[test]
    fn manual_alerts_alternate_triggered_and_resolved() {
        let mut gen = ManualAlertGenerator::new();
        let mut emitted = Vec::new();
        for _ in 0..10_000 {
            if let Some(value) = gen.generate(1) {
                emitted.push(value);
            }
        }
        assert!(!emitted.is_empty(), "no transitions in 10k ticks");
        for (i, value) in emitted.iter().enumerate() {
            let expected = if i % 2 == 0 { "triggered" } else { "resolved" };
            assert_eq!(value, expected, "emission {i} out of order");
        }
    }

    #[test]
    fn manual_alert_state_is_per_patient() {
        let mut gen = ManualAlertGenerator::new();
        // Drive patient 1 until it triggers; patient 2 stays independent and
        // must still start with `triggered`.
        let mut first_for_2 = None;
        for _ in 0..10_000 {
            gen.generate(1);
            if first_for_2.is_none() {
                first_for_2 = gen.generate(2);
            }
        }
        if let Some(value) = first_for_2 {
            assert_eq!(value, "triggered");
        }
    }
}
