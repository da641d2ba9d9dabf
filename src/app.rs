//! Application state and interaction logic.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::{Local, TimeZone};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::data::duration::format_elapsed;
use crate::data::rows::build_rows;
use crate::data::{ColorScale, DefaultColorScale, HourBucket, MonitorRow, HOURS};
use crate::source::{DataSource, MonitorState, MonitorTarget};
use crate::ui::bar::TICK_PITCH;
use crate::ui::Theme;

/// Turns a second count into a human-readable duration.
pub type ElapsedFormatter = fn(u64) -> String;

/// A tick in the dashboard: monitor row index and bucket index (0 = oldest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRef {
    pub monitor: usize,
    pub bucket: usize,
}

/// Contents of the open incident detail modal.
///
/// The app holds an `Option<IncidentModal>`: `Some` means the modal is open,
/// so title and body can never get out of step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentModal {
    pub title: String,
    pub body: Vec<String>,
}

impl IncidentModal {
    /// Modal for a clicked hour; `None` if the hour had no downtime.
    pub fn for_bucket(monitor_name: &str, bucket: &HourBucket) -> Option<Self> {
        if !bucket.has_downtime() {
            return None;
        }
        Some(Self {
            title: format!("🚨 {} incidents at {}", monitor_name, bucket.hour_label),
            body: bucket.reasons.clone(),
        })
    }
}

/// Where a bar strip was drawn during the last frame.
///
/// Recorded by the dashboard view so mouse events can be mapped back to
/// ticks. Only the most recent measurement is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    pub monitor: usize,
    pub area: Rect,
    /// Bucket index of the leftmost visible tick.
    pub first_bucket: usize,
    pub visible: usize,
}

impl BarLayout {
    /// Tick under the given terminal cell, if any.
    pub fn tick_at(&self, column: u16, row: u16) -> Option<TickRef> {
        if row != self.area.y || column < self.area.x || column >= self.area.right() {
            return None;
        }
        let offset = ((column - self.area.x) / TICK_PITCH) as usize;
        (offset < self.visible).then(|| TickRef {
            monitor: self.monitor,
            bucket: self.first_bucket + offset,
        })
    }

    /// Screen column of a bucket's tick, if it is visible.
    pub fn column_of(&self, bucket: usize) -> Option<u16> {
        if bucket < self.first_bucket || bucket >= self.first_bucket + self.visible {
            return None;
        }
        Some(self.area.x + (bucket - self.first_bucket) as u16 * TICK_PITCH)
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub title: String,
    pub monitors: Vec<MonitorTarget>,
    pub state: Option<MonitorState>,
    pub rows: Vec<MonitorRow>,
    pub load_error: Option<String>,
    pub last_loaded: Option<Instant>,
    /// Clock time of the last bucket computation (epoch seconds).
    pub now: i64,

    // Interaction
    pub selected: usize,
    pub hover: Option<TickRef>,
    pub modal: Option<IncidentModal>,
    pub bar_layouts: Vec<BarLayout>,

    // Injected collaborators
    pub theme: Theme,
    pub colors: Box<dyn ColorScale>,
    pub format_elapsed: ElapsedFormatter,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source` and showing `monitors`.
    ///
    /// An empty monitor list shows every monitor found in the state.
    pub fn new(source: Box<dyn DataSource>, monitors: Vec<MonitorTarget>) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            title: "Status".to_string(),
            monitors,
            state: None,
            rows: Vec::new(),
            load_error: None,
            last_loaded: None,
            now: 0,
            selected: 0,
            hover: None,
            modal: None,
            bar_layouts: Vec::new(),
            theme: Theme::dark(),
            colors: Box::new(DefaultColorScale),
            format_elapsed,
            status_message: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replace the uptime color policy.
    pub fn with_colors(mut self, colors: Box<dyn ColorScale>) -> Self {
        self.colors = colors;
        self
    }

    /// Replace the downtime duration formatter used in tooltips.
    pub fn with_elapsed_formatter(mut self, formatter: ElapsedFormatter) -> Self {
        self.format_elapsed = formatter;
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for a new snapshot.
    ///
    /// Returns Ok(true) if new data was received, Ok(false) if no new data.
    pub fn reload_data(&mut self) -> Result<bool> {
        if let Some(state) = self.source.poll() {
            for target in &self.monitors {
                if state.monitor_start(&target.id).is_none() {
                    warn!(monitor = %target.id, "no incident history for monitor");
                }
            }
            info!(
                source = self.source.description(),
                monitors = state.incident.len(),
                "loaded incident state"
            );
            self.state = Some(state);
            self.load_error = None;
            self.last_loaded = Some(Instant::now());
            self.refresh(Local::now().timestamp());
            return Ok(true);
        }

        // Keep the last good state on screen; just surface the error
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }
        Ok(false)
    }

    /// Recompute the buckets for wall-clock time `now` in the local timezone.
    pub fn refresh(&mut self, now: i64) {
        self.refresh_in(now, &Local);
    }

    /// Recompute the buckets for `now` in the given timezone.
    pub fn refresh_in<Tz: TimeZone>(&mut self, now: i64, tz: &Tz)
    where
        Tz::Offset: std::fmt::Display,
    {
        self.now = now;
        let Some(ref state) = self.state else {
            return;
        };
        self.rows = build_rows(now, &self.monitors, state, tz);

        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
        if self.hover.is_some_and(|h| h.monitor >= self.rows.len()) {
            self.hover = None;
        }
    }

    /// Number of monitors whose latest incident is unresolved.
    pub fn down_count(&self) -> usize {
        self.rows.iter().filter(|r| r.down).count()
    }

    /// The bucket under the hover cursor.
    pub fn hovered(&self) -> Option<(&MonitorRow, &HourBucket)> {
        let tick = self.hover?;
        let row = self.rows.get(tick.monitor)?;
        Some((row, row.buckets.get(tick.bucket)?))
    }

    /// Layout of the bar drawn for a monitor in the last frame.
    pub fn layout_for(&self, monitor: usize) -> Option<&BarLayout> {
        self.bar_layouts.iter().find(|l| l.monitor == monitor)
    }

    /// Tick under a terminal cell in the last drawn frame.
    pub fn tick_at(&self, column: u16, row: u16) -> Option<TickRef> {
        self.bar_layouts.iter().find_map(|l| l.tick_at(column, row))
    }

    /// Update hover from a mouse position. Returns true if over a tick.
    pub fn hover_at(&mut self, column: u16, row: u16) -> bool {
        self.hover = self.tick_at(column, row);
        self.hover.is_some()
    }

    /// Click a tick: opens the incident modal if the hour had downtime.
    ///
    /// Returns true if the modal was opened; ticks without downtime are
    /// not clickable.
    pub fn click_tick(&mut self, tick: TickRef) -> bool {
        let Some(row) = self.rows.get(tick.monitor) else {
            return false;
        };
        let Some(bucket) = row.buckets.get(tick.bucket) else {
            return false;
        };
        self.selected = tick.monitor;
        self.hover = Some(tick);

        match IncidentModal::for_bucket(&row.target.name, bucket) {
            Some(modal) => {
                debug!(monitor = %row.target.id, hour = %bucket.hour_label, "opening incident detail");
                self.modal = Some(modal);
                true
            }
            None => false,
        }
    }

    /// Click at a terminal cell.
    pub fn click_at(&mut self, column: u16, row: u16) -> bool {
        match self.tick_at(column, row) {
            Some(tick) => self.click_tick(tick),
            None => false,
        }
    }

    /// Click the tick under the hover cursor.
    pub fn activate_hover(&mut self) -> bool {
        match self.hover {
            Some(tick) => self.click_tick(tick),
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Oldest bucket a monitor's hover cursor may reach (the leftmost
    /// visible tick).
    fn first_hoverable(&self, monitor: usize) -> usize {
        self.layout_for(monitor).map(|l| l.first_bucket).unwrap_or(0)
    }

    /// Move the hover cursor one hour back in time.
    pub fn hover_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let first = self.first_hoverable(self.selected);
        let bucket = match self.hover {
            Some(tick) if tick.monitor == self.selected => tick.bucket.saturating_sub(1),
            _ => HOURS - 1,
        };
        self.hover = Some(TickRef {
            monitor: self.selected,
            bucket: bucket.max(first),
        });
    }

    /// Move the hover cursor one hour forward in time.
    pub fn hover_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let first = self.first_hoverable(self.selected);
        let bucket = match self.hover {
            Some(tick) if tick.monitor == self.selected => (tick.bucket + 1).min(HOURS - 1),
            _ => HOURS - 1,
        };
        self.hover = Some(TickRef {
            monitor: self.selected,
            bucket: bucket.max(first),
        });
    }

    /// Keep a keyboard hover cursor on the selected monitor.
    fn follow_selection(&mut self) {
        if let Some(tick) = self.hover {
            self.hover = Some(TickRef {
                monitor: self.selected,
                bucket: tick.bucket,
            });
        }
    }

    /// Move selection down by one monitor.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one monitor.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n monitors.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.rows.len().saturating_sub(1);
        self.selected = (self.selected + n).min(max);
        self.follow_selection();
    }

    /// Move selection up by n monitors.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
        self.follow_selection();
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.follow_selection();
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
        self.follow_selection();
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current buckets to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.state.is_none() {
            anyhow::bail!("No data to export");
        }
        write_export(&self.rows, path)
    }
}

/// JSON document describing every monitor's 24-hour bar.
pub fn export_json(rows: &[MonitorRow]) -> serde_json::Value {
    let monitors: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "id": row.target.id,
                "name": row.target.name,
                "down": row.down,
                "uptime_24h": row.uptime_24h(),
                "hours": row.buckets.iter().map(|b| {
                    serde_json::json!({
                        "hour_start": b.hour_start,
                        "hour": b.hour_label,
                        "monitored_secs": b.monitored_secs,
                        "down_secs": b.down_secs,
                        "uptime": b.uptime_label(),
                        "reasons": b.reasons,
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({ "monitors": monitors })
}

/// Write [`export_json`] to a file.
pub fn write_export(rows: &[MonitorRow], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&export_json(rows))?;
    std::fs::write(path, json)?;
    Ok(())
}
