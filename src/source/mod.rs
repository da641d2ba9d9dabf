//! Data source abstraction for receiving incident state snapshots.
//!
//! The viewer never computes incident state itself. It reads snapshots
//! produced elsewhere, either from a JSON file rewritten by the poller or
//! from a channel fed by an embedding program.

mod channel;
mod file;
mod state;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use state::{Incident, MonitorState, MonitorTarget};

use std::fmt::Debug;

/// Trait for receiving incident state from various sources.
///
/// # Example
///
/// ```
/// use uptime_bar::{DataSource, FileSource};
///
/// let mut source = FileSource::new("state.json");
/// if let Some(state) = source.poll() {
///     println!("Got {} monitors", state.incident.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(state)` if new data is available, `None` otherwise.
    /// This method must not block.
    fn poll(&mut self) -> Option<MonitorState>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns the error from the last poll, if any.
    fn error(&self) -> Option<&str>;
}
