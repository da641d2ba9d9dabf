use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to milliseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("h", 3_600_000.0),
    ("m", 60_000.0),
    ("s", 1_000.0),
];

/// Parse interval strings like "5s", "500ms", "1.5m", "2h"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if val < 0.0 || !val.is_finite() {
                bail!("Invalid duration: {}", s);
            }
            return Ok(Duration::from_millis((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Format an elapsed second count as "3h 12m", "1d 2h 5m 9s", "45s".
///
/// Zero components are skipped; a zero input renders as "0s".
pub fn format_elapsed(secs: u64) -> String {
    let parts = [
        (secs / 86_400, "d"),
        (secs % 86_400 / 3_600, "h"),
        (secs % 3_600 / 60, "m"),
        (secs % 60, "s"),
    ];

    let formatted: Vec<String> = parts
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();

    if formatted.is_empty() {
        "0s".to_string()
    } else {
        formatted.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        let d = parse_duration("5s").unwrap();
        assert_eq!(d.as_secs(), 5);
    }

    #[test]
    fn test_parse_milliseconds() {
        let d = parse_duration("250ms").unwrap();
        assert_eq!(d.as_millis(), 250);
    }

    #[test]
    fn test_parse_minutes_and_hours() {
        assert_eq!(parse_duration("1.5m").unwrap().as_secs(), 90);
        assert_eq!(parse_duration("2h").unwrap().as_secs(), 7200);
    }

    #[test]
    fn parse_with_whitespace() {
        let d = parse_duration("  100ms  ").unwrap();
        assert_eq!(d.as_millis(), 100);
    }

    #[test]
    fn parse_unknown_format_fails() {
        assert!(parse_duration("100x").is_err());
        assert!(parse_duration("abcs").is_err());
        assert!(parse_duration("-3s").is_err());
    }

    #[test]
    fn format_zero() {
        assert_eq!(format_elapsed(0), "0s");
    }

    #[test]
    fn format_hours_and_minutes() {
        assert_eq!(format_elapsed(3 * 3600 + 12 * 60), "3h 12m");
    }

    #[test]
    fn format_full_hour() {
        assert_eq!(format_elapsed(3600), "1h");
    }

    #[test]
    fn format_with_days_and_seconds() {
        assert_eq!(format_elapsed(86_400 + 2 * 3600 + 5 * 60 + 9), "1d 2h 5m 9s");
        assert_eq!(format_elapsed(45), "45s");
    }
}
