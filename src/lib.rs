// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # uptime-bar
//!
//! A terminal status dashboard that draws a 24-hour uptime bar per monitor.
//!
//! Each bar is a strip of hourly ticks colored by uptime. Hovering a tick
//! (mouse or arrow keys) shows a tooltip with the hour's uptime and
//! downtime; clicking a tick with downtime opens a modal listing the
//! incident reasons for that hour.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (buckets)│    │(widgets)│    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | ChannelSource                  │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, selection, hover and modal logic
//! - **[`source`]**: Incident state input ([`DataSource`] trait) from a
//!   polled file or a watch channel
//! - **[`data`]**: Hourly bucket computation ([`compute_buckets`]), color
//!   scale, duration helpers
//! - **[`ui`]**: The [`UptimeBar`] widget plus the dashboard around it
//! - **[`config`]**: Layered [`Settings`] (file + environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the state file named in uptime-bar.toml
//! uptime-bar
//!
//! # Override the state file and log to a file
//! uptime-bar --state /var/lib/uptime/state.json --log-file uptime-bar.log
//!
//! # Write the computed buckets as JSON and exit
//! uptime-bar --export buckets.json
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use uptime_bar::{App, FileSource, MonitorTarget};
//!
//! let source = Box::new(FileSource::new("state.json"));
//! let app = App::new(source, vec![MonitorTarget::new("api", "Public API")]);
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use uptime_bar::{App, ChannelSource, MonitorState};
//!
//! let (tx, source) = ChannelSource::create("poller");
//! let mut app = App::new(Box::new(source), Vec::new());
//!
//! tx.send(MonitorState::default()).unwrap();
//! assert!(app.reload_data().unwrap());
//! ```
//!
//! ### Computing buckets directly
//!
//! ```
//! use chrono::Utc;
//! use uptime_bar::{compute_buckets, HOURS};
//!
//! let buckets = compute_buckets(1_700_000_000, None, &[], &Utc);
//! assert_eq!(buckets.len(), HOURS);
//! assert!(buckets.iter().all(|b| b.uptime().is_none()));
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, IncidentModal};
pub use config::Settings;
pub use data::{compute_buckets, ColorScale, DefaultColorScale, HourBucket, MonitorRow, HOURS};
pub use source::{ChannelSource, DataSource, FileSource, Incident, MonitorState, MonitorTarget};
pub use ui::UptimeBar;
