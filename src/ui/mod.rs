//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`bar`]: The [`UptimeBar`] widget and its responsive truncation rules
//! - [`status`]: Dashboard listing one bar per monitor
//! - [`tooltip`]: Hover tooltip for a single hour
//! - [`detail`]: Incident detail modal
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ ▶ ● API                 99.86% (24h) │
//! │   █ █ █ █ █ █ █ █ █ █ █ █ █ █ █ █ █  │
//! │   22:00                         now  │
//! │ (status::render)                     │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - tooltip::render
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod bar;
pub mod common;
pub mod detail;
pub mod status;
pub mod theme;
pub mod tooltip;

pub use bar::UptimeBar;
pub use theme::Theme;
