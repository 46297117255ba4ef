//! File-based feed source.
//!
//! Polls a JSON file holding the current value per channel, e.g. the
//! export of the realtime database root:
//!
//! ```json
//! { "humidity": 42.0, "temperature": 21.5, "gasWarning": false, "lightSensor": true }
//! ```
//!
//! Each time the file's modification time advances, one event is queued
//! per channel present in the file, in subscription order.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde_json::Value;

use super::{Channel, FeedEvent, FeedSource};

/// A feed source that polls a JSON file of current sensor values.
///
/// The source tracks the file's modification time and only emits events
/// when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    pending: VecDeque<FeedEvent>,
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
            pending: VecDeque::new(),
        }
    }

    /// Returns the path being polled.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read the file and queue one event per present channel.
    fn read_file(&mut self) -> bool {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                return false;
            }
        };

        let values: Value = match serde_json::from_str(&content) {
            Ok(values) => values,
            Err(e) => {
                self.last_error = Some(format!("Parse error: {}", e));
                return false;
            }
        };

        self.last_error = None;
        for channel in Channel::ALL {
            if let Some(payload) = values.get(channel.path()) {
                self.pending.push_back(FeedEvent::new(channel, payload.clone()));
            }
        }
        true
    }
}

impl FeedSource for FileSource {
    fn poll(&mut self) -> Option<FeedEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let current_modified = self.get_modified_time();

        // Check if file has been modified since last read
        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, don't update
            (Some(last), Some(current)) => current > last,
        };

        if file_changed && self.read_file() {
            self.last_modified = current_modified;
        }

        self.pending.pop_front()
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
    use std::io::{Seek, Write};
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "humidity": 42.0,
            "temperature": 21.5,
            "gasWarning": false,
            "lightSensor": true
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/sensors.json");
        assert_eq!(source.path(), Path::new("/tmp/sensors.json"));
        assert_eq!(source.description(), "file: /tmp/sensors.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_emits_one_event_per_channel() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let channels: Vec<Channel> =
            std::iter::from_fn(|| source.poll()).map(|e| e.channel).collect();
        assert_eq!(channels, Channel::ALL.to_vec());

        // No further events until the file changes.
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_skips_absent_channels() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"temperature": 19.0}}"#).unwrap();

        let mut source = FileSource::new(file.path());

        let event = source.poll().unwrap();
        assert_eq!(event.channel, Channel::Temperature);
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_detects_changes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        while source.poll().is_some() {}

        // Modify the file (need to wait a bit for mtime to change)
        std::thread::sleep(std::time::Duration::from_millis(10));
        file.rewind().unwrap();
        writeln!(file, r#"{{"humidity": 55.0}}"#).unwrap();
        file.flush().unwrap();

        // Note: may be flaky on filesystems with low mtime resolution
        if let Some(event) = source.poll() {
            assert_eq!(event.channel, Channel::Humidity);
        }
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/sensors.json");

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
}
