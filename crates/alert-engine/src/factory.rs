use monitor_core::{Alert, MonitorError, SignalKind};

/// Build a typed alert from a wire tag.
///
/// Unknown tags are a configuration error, not a data error: the factory
/// fails loud instead of handing back a default-priority alert. Strategies
/// hold a [`SignalKind`] already and construct through [`Alert::for_kind`];
/// this entry point exists for callers that only have the external tag.
pub fn create_alert(
    tag: &str,
    patient_id: u32,
    condition: impl Into<String>,
    timestamp: i64,
) -> Result<Alert, MonitorError> {
    let kind = SignalKind::from_tag(tag)
        .ok_or_else(|| MonitorError::UnknownAlertType(tag.trim().to_string()))?;
    Ok(Alert::for_kind(kind, patient_id, condition, timestamp))
}
