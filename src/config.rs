//! Dashboard settings.
//!
//! Settings are layered: built-in defaults, then an optional config file,
//! then `UPTIME_BAR_*` environment variables. Command-line flags are
//! applied on top by the binary.
//!
//! ```toml
//! title = "Acme Status"
//! state_path = "/var/lib/uptime/state.json"
//! refresh = "5s"
//!
//! [[monitors]]
//! id = "api"
//! name = "Public API"
//!
//! [[monitors]]
//! id = "web"
//! name = "Website"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::source::MonitorTarget;

/// Environment variable prefix for overrides, e.g. `UPTIME_BAR_REFRESH=10s`.
pub const ENV_PREFIX: &str = "UPTIME_BAR";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shown in the header bar.
    pub title: String,
    /// JSON state file written by the poller.
    pub state_path: PathBuf,
    /// How often the state file is checked, e.g. "5s".
    pub refresh: String,
    /// Monitors to display, in order. Empty shows everything in the state.
    pub monitors: Vec<MonitorTarget>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Status".to_string(),
            state_path: PathBuf::from("state.json"),
            refresh: "5s".to_string(),
            monitors: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (optional) and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("loading config {}", path.display()))?;

        Ok(config.try_deserialize()?)
    }

    /// Parsed refresh interval.
    pub fn refresh_interval(&self) -> Result<Duration> {
        parse_duration(&self.refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/uptime-bar.toml")).unwrap();
        assert_eq!(settings.title, "Status");
        assert_eq!(settings.state_path, PathBuf::from("state.json"));
        assert!(settings.monitors.is_empty());
        assert_eq!(settings.refresh_interval().unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn loads_monitors_from_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
title = "Acme Status"
refresh = "500ms"

[[monitors]]
id = "api"
name = "Public API"

[[monitors]]
id = "web"
name = "Website"
"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.title, "Acme Status");
        assert_eq!(settings.refresh_interval().unwrap(), Duration::from_millis(500));
        assert_eq!(
            settings.monitors,
            vec![MonitorTarget::new("api", "Public API"), MonitorTarget::new("web", "Website")]
        );
    }

    #[test]
    fn bad_refresh_is_an_error() {
        let settings = Settings {
            refresh: "soon".to_string(),
            ..Settings::default()
        };
        assert!(settings.refresh_interval().is_err());
    }
}
