/// Human readable rendering of a duration given in seconds.
///
/// Values under one second are shown in milliseconds. Larger values use
/// the two most significant units among weeks, days, hours, minutes and
/// seconds, dropping trailing zero units.
pub fn seconds(secs: f64) -> String {
    if !secs.is_finite() {
        return "unknown".to_string();
    }

    if secs < 0.0 {
        return format!("-{}", seconds(-secs));
    }

    if secs < 1.0 {
        return plural(secs * 1000.0, "millisecond");
    }

    const UNITS: [(&str, u64); 5] = [
        ("week", 7 * 24 * 3600),
        ("day", 24 * 3600),
        ("hour", 3600),
        ("minute", 60),
        ("second", 1),
    ];

    let mut rest = secs.round() as u64;
    let mut parts = Vec::new();

    for (name, size) in UNITS {
        let count = rest / size;
        rest %= size;
        if count > 0 || !parts.is_empty() {
            parts.push((count, name));
        }
        if parts.len() == 2 {
            break;
        }
    }

    parts
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, name)| plural(count as f64, name))
        .collect::<Vec<_>>()
        .join(" ")
}

fn plural(value: f64, unit: &str) -> String {
    let value = value.round() as u64;
    if value == 1 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}
