use crate::pressure::parse_pair;
use crate::saturation::parse_percent;
use monitor_core::{Alert, SignalKind, VitalRecord};

/// Cross-signal check: hypotension (systolic < 90) together with hypoxemia
/// (saturation < 92) in the same window.
///
/// Both lists are scanned in input order, not time order. The first
/// qualifying pair raises one alert stamped with the later of the two
/// timestamps, and the scan stops: at most one correlated alert per
/// evaluation no matter how many pairs qualify. Malformed pressure
/// encodings are skipped without aborting the scan.
pub fn check_hypotensive_hypoxemia(
    patient_id: u32,
    pressure: &[VitalRecord],
    saturation: &[VitalRecord],
) -> Option<Alert> {
    for bp in pressure {
        let Some((sys, _)) = parse_pair(&bp.value) else {
            continue;
        };
        if sys >= 90 {
            continue;
        }

        for sat in saturation {
            let Some(value) = parse_percent(&sat.value) else {
                continue;
            };
            if value < 92.0 {
                let timestamp = bp.timestamp.max(sat.timestamp);
                return Some(Alert::for_kind(
                    SignalKind::Pressure,
                    patient_id,
                    "Hypotensive Hypoxemia",
                    timestamp,
                ));
            }
        }
    }

    None
}
