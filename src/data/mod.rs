//! Data models and processing for incident state.
//!
//! ## Submodules
//!
//! - [`buckets`]: Hourly uptime bucketing ([`HourBucket`], [`compute_buckets`])
//! - [`color`]: Uptime color policy ([`ColorScale`])
//! - [`duration`]: Parsing of interval strings and formatting of elapsed time
//! - [`rows`]: Per-monitor bar data derived from a state snapshot
//!
//! ## Data Flow
//!
//! ```text
//! MonitorState (raw JSON)
//!        │
//!        ▼
//! build_rows(now, monitors, state)
//!        │
//!        └──▶ MonitorRow { target, buckets: [HourBucket; 24] }
//! ```

pub mod buckets;
pub mod color;
pub mod duration;
pub mod rows;

pub use buckets::{compute_buckets, overlap_len, HourBucket, HOURS};
pub use color::{ColorScale, DefaultColorScale};
pub use rows::{build_rows, MonitorRow};
