use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert priority never exceeds this, decorated or not.
pub const MAX_PRIORITY: u8 = 5;

/// One timestamped measurement for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalRecord {
    pub patient_id: u32,
    /// Raw signal tag as it arrived on the wire. Compared case-insensitively.
    pub signal_type: String,
    /// Raw measurement payload. Encoding is signal-specific: plain numeric,
    /// numeric with a trailing `%`, or a `sys/dia` pair.
    pub value: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl VitalRecord {
    pub fn new(
        patient_id: u32,
        signal_type: impl Into<String>,
        value: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            patient_id,
            signal_type: signal_type.into(),
            value: value.into(),
            timestamp,
        }
    }
}

/// The closed set of signal categories the engine knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    Pressure,
    Saturation,
    CardiacRhythm,
    HeartRate,
}

impl SignalKind {
    /// Resolve a wire tag, case-insensitively. `None` for tags outside the
    /// closed set; those records are stored but never evaluated.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "bloodpressure" => Some(SignalKind::Pressure),
            "saturation" => Some(SignalKind::Saturation),
            "ecg" => Some(SignalKind::CardiacRhythm),
            "heartrate" => Some(SignalKind::HeartRate),
            _ => None,
        }
    }

    /// Canonical lowercase wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            SignalKind::Pressure => "bloodpressure",
            SignalKind::Saturation => "saturation",
            SignalKind::CardiacRhythm => "ecg",
            SignalKind::HeartRate => "heartrate",
        }
    }

    /// Fixed default priority for alerts of this signal. Higher is more urgent.
    pub fn default_priority(&self) -> u8 {
        match self {
            SignalKind::HeartRate => 1,
            SignalKind::Pressure | SignalKind::Saturation => 2,
            SignalKind::CardiacRhythm => 3,
        }
    }
}

/// Alert type tag. `Generic` carries priority 0 and only comes out of
/// [`Alert::bare`]; every strategy-produced alert is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    Generic,
    Pressure,
    Saturation,
    CardiacRhythm,
    HeartRate,
}

impl AlertKind {
    pub fn tag(&self) -> &'static str {
        match self {
            AlertKind::Generic => "generic",
            AlertKind::Pressure => SignalKind::Pressure.tag(),
            AlertKind::Saturation => SignalKind::Saturation.tag(),
            AlertKind::CardiacRhythm => SignalKind::CardiacRhythm.tag(),
            AlertKind::HeartRate => SignalKind::HeartRate.tag(),
        }
    }
}

impl From<SignalKind> for AlertKind {
    fn from(kind: SignalKind) -> Self {
        match kind {
            SignalKind::Pressure => AlertKind::Pressure,
            SignalKind::Saturation => AlertKind::Saturation,
            SignalKind::CardiacRhythm => AlertKind::CardiacRhythm,
            SignalKind::HeartRate => AlertKind::HeartRate,
        }
    }
}

/// A detected clinical condition, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub patient_id: u32,
    /// Human-readable condition description. Never empty.
    pub condition: String,
    /// Epoch milliseconds; a record timestamp for point conditions, the
    /// evaluation wall clock for series conditions.
    pub timestamp: i64,
    pub kind: AlertKind,
    pub priority: u8,
}

impl Alert {
    /// Untyped alert with the generic tag and priority 0. Test and fallback
    /// construction only; strategies go through [`Alert::for_kind`].
    pub fn bare(patient_id: u32, condition: impl Into<String>, timestamp: i64) -> Self {
        Self {
            patient_id,
            condition: condition.into(),
            timestamp,
            kind: AlertKind::Generic,
            priority: 0,
        }
    }

    /// Typed alert carrying the signal kind's default priority.
    pub fn for_kind(
        kind: SignalKind,
        patient_id: u32,
        condition: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            patient_id,
            condition: condition.into(),
            timestamp,
            kind: kind.into(),
            priority: kind.default_priority(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} alert] {} - patient {} at {} (priority {})",
            self.kind.tag(),
            self.condition,
            self.patient_id,
            self.timestamp,
            self.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_resolution_is_case_insensitive() {
        assert_eq!(SignalKind::from_tag("BloodPressure"), Some(SignalKind::Pressure));
        assert_eq!(SignalKind::from_tag(" ECG "), Some(SignalKind::CardiacRhythm));
        assert_eq!(SignalKind::from_tag("HEARTRATE"), Some(SignalKind::HeartRate));
        assert_eq!(SignalKind::from_tag("saturation"), Some(SignalKind::Saturation));
        assert_eq!(SignalKind::from_tag("cholesterol"), None);
    }

    #[test]
    fn default_priorities() {
        assert_eq!(SignalKind::HeartRate.default_priority(), 1);
        assert_eq!(SignalKind::Pressure.default_priority(), 2);
        assert_eq!(SignalKind::Saturation.default_priority(), 2);
        assert_eq!(SignalKind::CardiacRhythm.default_priority(), 3);
    }

    #[test]
    fn bare_alert_is_generic_priority_zero() {
        let alert = Alert::bare(7, "Manual Check", 1000);
        assert_eq!(alert.kind, AlertKind::Generic);
        assert_eq!(alert.priority, 0);
    }

    #[test]
    fn typed_alert_carries_kind_and_priority() {
        let alert = Alert::for_kind(SignalKind::CardiacRhythm, 3, "Abnormal ECG Peak", 42);
        assert_eq!(alert.kind, AlertKind::CardiacRhythm);
        assert_eq!(alert.priority, 3);
        assert_eq!(alert.patient_id, 3);
    }
}
