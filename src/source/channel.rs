//! Channel-based data source.
//!
//! Receives incident state via a tokio watch channel. Useful when the
//! widget is embedded in a program that already holds the state in memory
//! and pushes fresh snapshots rather than writing a file.

use tokio::sync::watch;

use super::{DataSource, MonitorState};

/// A data source that receives incident state via a channel.
///
/// # Example
///
/// ```
/// use uptime_bar::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("in-process poller");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<MonitorState>,
    description: String,
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source from the receiving end of a watch channel.
    pub fn new(receiver: watch::Receiver<MonitorState>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair.
    ///
    /// Returns (sender, source): the sender pushes snapshots, the source is
    /// handed to the [`App`](crate::App).
    pub fn create(source_description: &str) -> (watch::Sender<MonitorState>, Self) {
        let (tx, rx) = watch::channel(MonitorState::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<MonitorState> {
        // The initial value counts as new data on the first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Incident;

    fn state_with(id: &str, start: i64) -> MonitorState {
        let mut state = MonitorState::default();
        state.incident.insert(
            id.to_string(),
            vec![Incident {
                start: vec![start],
                error: vec!["dummy".to_string()],
                end: Some(start),
            }],
        );
        state
    }

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "channel: test");

        let state = source.poll().expect("initial value is returned once");
        assert!(state.incident.is_empty());
        assert!(source.poll().is_none());

        tx.send(state_with("api", 100)).unwrap();

        let state = source.poll().unwrap();
        assert_eq!(state.monitor_start("api"), Some(100));
        assert!(source.error().is_none());
    }

    #[test]
    fn test_channel_source_from_task() {
        tokio_test::block_on(async {
            let (tx, mut source) = ChannelSource::create("task");
            let _ = source.poll();

            tokio::spawn(async move {
                tx.send(state_with("db", 42)).unwrap();
            })
            .await
            .unwrap();

            let state = source.poll().unwrap();
            assert_eq!(state.monitor_start("db"), Some(42));
        });
    }
}
