//! Hourly uptime bucketing.
//!
//! Splits the last 24 hours into one-hour windows anchored at the top of
//! the current local hour and measures, for each window, how long the
//! monitor was observed and how long it was down.

use chrono::{DateTime, TimeZone, Timelike};
use serde::Serialize;

use crate::source::Incident;

/// Number of hourly buckets in the bar.
pub const HOURS: usize = 24;

const HOUR_SECS: i64 = 3600;

/// One hour of derived uptime data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourBucket {
    /// Window start in epoch seconds (inclusive).
    pub hour_start: i64,
    /// Window end in epoch seconds (exclusive).
    pub hour_end: i64,
    /// Local time-of-day of `hour_start`, `HH:MM`.
    pub hour_label: String,
    /// Seconds of the window during which the monitor existed.
    pub monitored_secs: i64,
    /// Seconds of the window covered by incidents.
    pub down_secs: i64,
    /// `"[HH:MM-HH:MM] <error>"` for every incident phase in the window.
    pub reasons: Vec<String>,
}

impl HourBucket {
    /// Uptime percentage rounded to 4 significant digits, or `None` when
    /// the monitor was not observed at all during this hour.
    pub fn uptime(&self) -> Option<f64> {
        uptime_percent(self.monitored_secs, self.down_secs)
    }

    /// Uptime as displayed, e.g. `"75.00"`; `None` means "No Data".
    pub fn uptime_label(&self) -> Option<String> {
        self.uptime().map(|p| to_precision(p, 4))
    }

    pub fn has_downtime(&self) -> bool {
        self.down_secs > 0
    }
}

/// Length of the intersection of `[x1, x2)` and `[y1, y2)`.
pub fn overlap_len(x1: i64, x2: i64, y1: i64, y2: i64) -> i64 {
    (x2.min(y2) - x1.max(y1)).max(0)
}

/// `now` truncated to the top of its local hour.
pub fn hour_anchor<Tz: TimeZone>(now: i64, tz: &Tz) -> i64 {
    match DateTime::from_timestamp(now, 0) {
        Some(utc) => {
            let local = utc.with_timezone(tz);
            now - i64::from(local.minute() * 60 + local.second())
        }
        None => now - now.rem_euclid(HOUR_SECS),
    }
}

/// Local `HH:MM` for an epoch timestamp.
pub fn clock_label<Tz: TimeZone>(ts: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Compute the 24 hourly buckets ending at the current hour, oldest first.
///
/// `monitor_start` is the time the monitor was first observed; `None`
/// yields buckets with no monitored time ("No Data").
pub fn compute_buckets<Tz: TimeZone>(
    now: i64,
    monitor_start: Option<i64>,
    incidents: &[Incident],
    tz: &Tz,
) -> Vec<HourBucket>
where
    Tz::Offset: std::fmt::Display,
{
    let anchor = hour_anchor(now, tz);

    (0..HOURS as i64)
        .rev()
        .map(|i| hour_bucket(anchor - i * HOUR_SECS, now, monitor_start, incidents, tz))
        .collect()
}

/// Compute a single bucket for the window `[hour_start, hour_start + 3600)`.
pub fn hour_bucket<Tz: TimeZone>(
    hour_start: i64,
    now: i64,
    monitor_start: Option<i64>,
    incidents: &[Incident],
    tz: &Tz,
) -> HourBucket
where
    Tz::Offset: std::fmt::Display,
{
    let hour_end = hour_start + HOUR_SECS;

    let monitored_secs = monitor_start
        .map(|start| overlap_len(hour_start, hour_end, start, now))
        .unwrap_or(0);

    let mut down_secs = 0;
    let mut reasons = Vec::new();

    for incident in incidents {
        let Some(incident_start) = incident.first_start() else {
            continue;
        };
        let incident_end = incident.end_or(now);

        let overlap = overlap_len(hour_start, hour_end, incident_start, incident_end);
        down_secs += overlap;
        if overlap == 0 {
            continue;
        }

        let phases = incident.start.len().min(incident.error.len());
        for i in 0..phases {
            let phase_end = if i + 1 == phases {
                incident_end
            } else {
                incident.start[i + 1]
            };
            let part_start = incident.start[i].max(hour_start);
            let part_end = phase_end.min(hour_end);

            if overlap_len(hour_start, hour_end, part_start, part_end) > 0 {
                reasons.push(format!(
                    "[{}-{}] {}",
                    clock_label(part_start, tz),
                    clock_label(part_end, tz),
                    incident.error[i]
                ));
            }
        }
    }

    HourBucket {
        hour_start,
        hour_end,
        hour_label: clock_label(hour_start, tz),
        monitored_secs,
        down_secs,
        reasons,
    }
}

/// Uptime percentage rounded to 4 significant digits.
pub fn uptime_percent(monitored_secs: i64, down_secs: i64) -> Option<f64> {
    if monitored_secs == 0 {
        return None;
    }
    let raw = (monitored_secs - down_secs) as f64 / monitored_secs as f64 * 100.0;
    Some(round_to_precision(raw, 4))
}

/// Aggregate uptime over a set of buckets.
pub fn total_uptime(buckets: &[HourBucket]) -> Option<f64> {
    let monitored = buckets.iter().map(|b| b.monitored_secs).sum();
    let down = buckets.iter().map(|b| b.down_secs).sum();
    uptime_percent(monitored, down)
}

fn exponent(x: f64) -> i32 {
    x.abs().log10().floor() as i32
}

/// Round to `digits` significant digits.
pub fn round_to_precision(x: f64, digits: i32) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let factor = 10f64.powi(digits - 1 - exponent(x));
    (x * factor).round() / factor
}

/// Format with exactly `digits` significant digits: `75.0 -> "75.00"`,
/// `100.0 -> "100.0"`, `0.0 -> "0.000"`.
pub fn to_precision(x: f64, digits: i32) -> String {
    let rounded = round_to_precision(x, digits);
    let exp = if rounded == 0.0 { 0 } else { exponent(rounded) };
    let decimals = (digits - 1 - exp).max(0) as usize;
    format!("{:.*}", decimals, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    // 2023-11-14 22:13:20 UTC
    const NOW: i64 = 1_700_000_000;
    const ANCHOR: i64 = 1_699_999_200;

    fn incident(start: &[i64], error: &[&str], end: Option<i64>) -> Incident {
        Incident {
            start: start.to_vec(),
            error: error.iter().map(|s| s.to_string()).collect(),
            end,
        }
    }

    #[test]
    fn overlap_examples() {
        assert_eq!(overlap_len(10, 20, 15, 25), 5);
        assert_eq!(overlap_len(10, 20, 25, 30), 0);
        assert_eq!(overlap_len(10, 20, 12, 18), 6);
        assert_eq!(overlap_len(15, 25, 10, 20), 5);
    }

    #[test]
    fn anchor_truncates_to_local_hour() {
        assert_eq!(hour_anchor(NOW, &Utc), ANCHOR);
        assert_eq!(hour_anchor(ANCHOR, &Utc), ANCHOR);

        // Half-hour offsets move the top of the hour
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(hour_anchor(NOW, &ist), ANCHOR - 1800);
    }

    #[test]
    fn buckets_are_oldest_first() {
        let buckets = compute_buckets(NOW, Some(0), &[], &Utc);
        assert_eq!(buckets.len(), HOURS);
        assert_eq!(buckets[23].hour_start, ANCHOR);
        assert_eq!(buckets[0].hour_start, ANCHOR - 23 * 3600);
        assert!(buckets.windows(2).all(|w| w[1].hour_start - w[0].hour_start == 3600));
        assert_eq!(buckets[23].hour_label, "22:00");
        assert_eq!(buckets[0].hour_label, "23:00");
    }

    #[test]
    fn no_incidents_full_hours_are_fully_up() {
        let dummy = incident(&[0], &["dummy"], Some(0));
        let buckets = compute_buckets(NOW, Some(0), &[dummy], &Utc);

        for bucket in &buckets[..23] {
            assert_eq!(bucket.monitored_secs, 3600);
            assert_eq!(bucket.down_secs, 0);
            assert_eq!(bucket.uptime_label().as_deref(), Some("100.0"));
            assert!(bucket.reasons.is_empty());
        }
    }

    #[test]
    fn current_hour_is_partial() {
        let buckets = compute_buckets(NOW, Some(0), &[], &Utc);
        assert_eq!(buckets[23].monitored_secs, NOW - ANCHOR);
    }

    #[test]
    fn late_monitor_start_counts_only_overlap() {
        let hour_start = ANCHOR - 5 * 3600;
        let monitor_start = hour_start + 1000;

        let bucket = hour_bucket(hour_start, NOW, Some(monitor_start), &[], &Utc);
        assert_eq!(bucket.monitored_secs, 2600);

        // Hours before the monitor existed have no data
        let buckets = compute_buckets(NOW, Some(monitor_start), &[], &Utc);
        assert!(buckets[0].uptime().is_none());
        assert_eq!(buckets[0].uptime_label(), None);
    }

    #[test]
    fn ongoing_incident_covers_full_hour() {
        let hour_start = ANCHOR - 3 * 3600;
        let down = incident(&[hour_start], &["timeout"], None);

        let bucket = hour_bucket(hour_start, NOW, Some(0), &[down], &Utc);
        assert_eq!(bucket.down_secs, 3600);
        assert_eq!(bucket.monitored_secs, 3600);
        assert_eq!(bucket.uptime_label().as_deref(), Some("0.000"));
        assert_eq!(bucket.reasons, vec!["[19:00-20:00] timeout"]);
    }

    #[test]
    fn phases_produce_labeled_reasons() {
        let inc = incident(&[100, 200], &["A", "B"], Some(300));

        let bucket = hour_bucket(0, 18_000, Some(0), &[inc], &Utc);
        assert_eq!(bucket.down_secs, 200);
        assert_eq!(bucket.reasons, vec!["[00:01-00:03] A", "[00:03-00:05] B"]);
    }

    #[test]
    fn phases_outside_window_are_skipped() {
        // Phase A ends before the window, phase B straddles its start
        let inc = incident(&[3000, 3500], &["A", "B"], Some(4000));

        let bucket = hour_bucket(3600, 18_000, Some(0), &[inc], &Utc);
        assert_eq!(bucket.down_secs, 400);
        assert_eq!(bucket.reasons, vec!["[01:00-01:06] B"]);
    }

    #[test]
    fn incident_spanning_hours_splits_downtime() {
        let start = ANCHOR - 2 * 3600 + 1800;
        let inc = incident(&[start], &["HTTP 500"], Some(start + 3600));
        let buckets = compute_buckets(NOW, Some(0), &[inc], &Utc);

        assert_eq!(buckets[21].down_secs, 1800);
        assert_eq!(buckets[22].down_secs, 1800);
        assert_eq!(buckets[21].uptime_label().as_deref(), Some("50.00"));
        assert_eq!(buckets[23].down_secs, 0);
    }

    #[test]
    fn empty_incident_is_ignored() {
        let empty = incident(&[], &[], None);
        let bucket = hour_bucket(0, 18_000, Some(0), &[empty], &Utc);
        assert_eq!(bucket.down_secs, 0);
    }

    #[test]
    fn uptime_formula() {
        assert_eq!(to_precision(uptime_percent(3600, 900).unwrap(), 4), "75.00");
        assert_eq!(uptime_percent(0, 0), None);
    }

    #[test]
    fn precision_formatting() {
        assert_eq!(to_precision(100.0, 4), "100.0");
        assert_eq!(to_precision(99.996, 4), "100.0");
        assert_eq!(to_precision(99.9444, 4), "99.94");
        assert_eq!(to_precision(5.12345, 4), "5.123");
        assert_eq!(to_precision(0.0, 4), "0.000");
    }

    #[test]
    fn total_uptime_aggregates() {
        let buckets = vec![
            hour_bucket(0, 7200, Some(0), &[incident(&[0], &["x"], Some(900))], &Utc),
            hour_bucket(3600, 7200, Some(0), &[], &Utc),
        ];
        assert_eq!(total_uptime(&buckets), Some(87.5));
        assert_eq!(total_uptime(&[]), None);
    }
}
