//! Shared types for incident state snapshots.
//!
//! These types match the JSON state file written by the external monitor
//! poller. They are the common data format between that producer and this
//! viewer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A monitored target as configured by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorTarget {
    /// Key into [`MonitorState::incident`].
    pub id: String,
    /// Display name.
    pub name: String,
}

impl MonitorTarget {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single incident with one or more error phases.
///
/// `start` and `error` are parallel: phase `i` began at `start[i]` with
/// message `error[i]`. An absent `end` means the incident is still ongoing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// Phase start times in epoch seconds, non-decreasing.
    pub start: Vec<i64>,
    /// Error message for each phase.
    pub error: Vec<String>,
    /// Resolution time in epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

impl Incident {
    /// Time the incident began, if it has any phase at all.
    pub fn first_start(&self) -> Option<i64> {
        self.start.first().copied()
    }

    /// End of the incident, or `now` when it is still ongoing.
    pub fn end_or(&self, now: i64) -> i64 {
        self.end.unwrap_or(now)
    }

    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }
}

/// A complete snapshot of incident history for all monitors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorState {
    /// Incidents per monitor id, ordered chronologically.
    #[serde(default)]
    pub incident: BTreeMap<String, Vec<Incident>>,
    /// When the poller last wrote this snapshot (epoch seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<i64>,
}

impl MonitorState {
    /// Incidents recorded for a monitor; empty if the monitor is unknown.
    pub fn incidents(&self, monitor_id: &str) -> &[Incident] {
        self.incident.get(monitor_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The time a monitor was first observed.
    ///
    /// The poller anchors every monitor with an initial incident, so the
    /// first start of the first incident is the "observed since" time.
    pub fn monitor_start(&self, monitor_id: &str) -> Option<i64> {
        self.incidents(monitor_id).first().and_then(Incident::first_start)
    }

    /// Whether the monitor currently has an unresolved incident.
    pub fn is_down(&self, monitor_id: &str) -> bool {
        self.incidents(monitor_id).last().is_some_and(Incident::is_ongoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_state() {
        let json = r#"{
            "lastUpdate": 1700003600,
            "incident": {
                "api": [
                    { "start": [1700000000], "end": 1700000000, "error": ["dummy"] },
                    { "start": [1700001000, 1700001200], "error": ["timeout", "HTTP 502"] }
                ]
            }
        }"#;

        let state: MonitorState = serde_json::from_str(json).unwrap();
        assert_eq!(state.last_update, Some(1700003600));

        let incidents = state.incidents("api");
        assert_eq!(incidents.len(), 2);
        assert_eq!(incidents[0].end, Some(1700000000));
        assert_eq!(incidents[1].error, vec!["timeout", "HTTP 502"]);
        assert!(incidents[1].is_ongoing());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let json = r#"{ "overallUp": 3, "latency": {}, "incident": {} }"#;
        let state: MonitorState = serde_json::from_str(json).unwrap();
        assert!(state.incident.is_empty());
        assert!(state.last_update.is_none());
    }

    #[test]
    fn monitor_start_uses_first_incident() {
        let mut state = MonitorState::default();
        state.incident.insert(
            "web".to_string(),
            vec![
                Incident {
                    start: vec![500],
                    error: vec!["dummy".to_string()],
                    end: Some(500),
                },
                Incident {
                    start: vec![900],
                    error: vec!["down".to_string()],
                    end: None,
                },
            ],
        );

        assert_eq!(state.monitor_start("web"), Some(500));
        assert_eq!(state.monitor_start("missing"), None);
        assert!(state.is_down("web"));
        assert!(!state.is_down("missing"));
    }

    #[test]
    fn end_or_falls_back_to_now() {
        let incident = Incident {
            start: vec![10],
            error: vec!["x".to_string()],
            end: None,
        };
        assert_eq!(incident.end_or(99), 99);
    }
}
