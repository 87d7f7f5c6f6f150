use monitor_core::{Alert, MAX_PRIORITY};

/// Raise an alert's displayed priority by `extra`, capped at [`MAX_PRIORITY`].
/// Presentation-time decoration: the alert's identity is untouched.
pub fn bump_priority(mut alert: Alert, extra: u8) -> Alert {
    alert.priority = alert.priority.saturating_add(extra).min(MAX_PRIORITY);
    alert
}

/// Append a repetition count to the condition text. Composes with
/// [`bump_priority`] in either order.
pub fn annotate_repeat(mut alert: Alert, count: u32) -> Alert {
    alert.condition = format!("{} (repeated x{})", alert.condition, count);
    alert
}
