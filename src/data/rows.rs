//! Per-monitor bar data.
//!
//! Turns a raw [`MonitorState`] plus the configured monitor list into the
//! rows the dashboard draws, one 24-hour bar per monitor.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::TimeZone;

use super::buckets::{compute_buckets, total_uptime, HourBucket};
use crate::source::{MonitorState, MonitorTarget};

/// One dashboard row: a monitor and its 24 hourly buckets, oldest first.
#[derive(Debug, Clone)]
pub struct MonitorRow {
    pub target: MonitorTarget,
    pub buckets: Vec<HourBucket>,
    /// The monitor has an unresolved incident right now.
    pub down: bool,
    /// The state holds no incident history for this monitor.
    pub missing: bool,
}

impl MonitorRow {
    /// Uptime across the whole 24-hour window.
    pub fn uptime_24h(&self) -> Option<f64> {
        total_uptime(&self.buckets)
    }
}

/// Load a state snapshot from a JSON file.
pub fn load_state(path: &Path) -> Result<MonitorState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    parse_state(&content)
}

/// Parse a state snapshot from a JSON string.
pub fn parse_state(content: &str) -> Result<MonitorState> {
    Ok(serde_json::from_str(content)?)
}

/// Monitors to display: the configured list, or every monitor in the state
/// (named by id) when nothing is configured.
pub fn effective_monitors(configured: &[MonitorTarget], state: &MonitorState) -> Vec<MonitorTarget> {
    if !configured.is_empty() {
        return configured.to_vec();
    }
    state.incident.keys().map(|id| MonitorTarget::new(id.clone(), id.clone())).collect()
}

/// Build a row per monitor at time `now` (epoch seconds).
pub fn build_rows<Tz: TimeZone>(
    now: i64,
    monitors: &[MonitorTarget],
    state: &MonitorState,
    tz: &Tz,
) -> Vec<MonitorRow>
where
    Tz::Offset: std::fmt::Display,
{
    effective_monitors(monitors, state)
        .into_iter()
        .map(|target| {
            let incidents = state.incidents(&target.id);
            let monitor_start = state.monitor_start(&target.id);
            MonitorRow {
                buckets: compute_buckets(now, monitor_start, incidents, tz),
                down: state.is_down(&target.id),
                missing: monitor_start.is_none(),
                target,
            }
        })
        .collect()
}
