use std::time::Duration;

/// Format an elapsed time as days, hours and minutes, e.g. `3d 4h 15m`.
///
/// Zero parts are left out. Durations under a minute show whole seconds, and
/// anything under a second is `0m`.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = total_seconds % 86_400 / 3_600;
    let minutes = total_seconds % 3_600 / 60;

    let parts: Vec<String> = [(days, 'd'), (hours, 'h'), (minutes, 'm')]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    if parts.is_empty() {
        if total_seconds > 0 {
            format!("{total_seconds}s")
        } else {
            "0m".to_string()
        }
    } else {
        parts.join(" ")
    }
}
