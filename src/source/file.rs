//! File-based data source.
//!
//! Polls the poller's JSON state file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use super::{DataSource, MonitorState};

/// A data source that reads incident state from a JSON file.
///
/// The source tracks the file's modification time and only returns
/// new data when the file has been rewritten.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<MonitorState> {
        let result = fs::read_to_string(&self.path)
            .map_err(|e| format!("Read error: {}", e))
            .and_then(|content| {
                serde_json::from_str(&content).map_err(|e| format!("Parse error: {}", e))
            });

        match result {
            Ok(state) => {
                self.last_error = None;
                Some(state)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to load state file");
                self.last_error = Some(e);
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<MonitorState> {
        let current_modified = self.modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,
            // Keep showing the last good state if the file disappears
            (Some(_), None) => false,
            (Some(last), Some(current)) => current > last,
        };

        if !file_changed {
            return None;
        }

        let state = self.read_file()?;
        debug!(path = %self.path.display(), monitors = state.incident.len(), "state file reloaded");
        self.last_modified = current_modified;
        Some(state)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "incident": {
                "api": [
                    { "start": [1700000000], "end": 1700000000, "error": ["dummy"] }
                ]
            }
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/state.json");
        assert_eq!(source.path(), Path::new("/tmp/state.json"));
        assert_eq!(source.description(), "file: /tmp/state.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_poll_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let state = source.poll().expect("first poll should read the file");
        assert_eq!(state.monitor_start("api"), Some(1700000000));

        // Unchanged file yields nothing new
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/state.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_file_source_recovers_after_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ broken").unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());
        assert!(source.error().is_some());

        // last_modified was never recorded, so the next poll re-reads
        std::fs::write(file.path(), sample_json()).unwrap();
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }
}
