//! Fire-and-forget persistence of the session clock.
//!
//! After every tick the session store hands the elapsed seconds to a sink.
//! Nothing in the system reads the value back; the write exists only so the
//! last session time survives the process. Sink failures are logged by the
//! caller and never surfaced.

use crate::Result;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name the elapsed seconds are written under in the data directory
pub const SESSION_SECONDS_FILE: &str = "session_seconds.json";

/// Receiver for the per-tick elapsed-seconds write
pub trait ElapsedSink: Send {
    fn record(&mut self, session_seconds: u32) -> Result<()>;
}

/// On-disk record written by [`JsonFileSink`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ElapsedRecord {
    pub session_seconds: u32,
    pub updated_at: DateTime<Utc>,
}

/// Sink that overwrites a single JSON file under a fixed key
///
/// Writes are atomic: a locked temp file in the same directory is renamed
/// over the target, so a reader never observes a torn record.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional sink location inside a data directory
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SESSION_SECONDS_FILE))
    }
}

impl ElapsedSink for JsonFileSink {
    fn record(&mut self, session_seconds: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "sink path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let record = ElapsedRecord {
                session_seconds,
                updated_at: Utc::now(),
            };
            let contents = serde_json::to_string(&record)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path)
            .map_err(|e| crate::Error::Io(e.error))?;

        tracing::trace!("Recorded {}s to {:?}", session_seconds, self.path);
        Ok(())
    }
}

/// Sink that drops every record, for callers with no persistence requirement
pub struct NoopSink;

impl ElapsedSink for NoopSink {
    fn record(&mut self, _session_seconds: u32) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_writes_json_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::in_data_dir(temp_dir.path());

        sink.record(42).unwrap();

        let path = temp_dir.path().join(SESSION_SECONDS_FILE);
        let contents = std::fs::read_to_string(&path).unwrap();
        let record: ElapsedRecord = serde_json::from_str(&contents).unwrap();
        assert_eq!(record.session_seconds, 42);
    }

    #[test]
    fn test_record_overwrites_previous_value() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("elapsed.json");
        let mut sink = JsonFileSink::new(&path);

        sink.record(1).unwrap();
        sink.record(2).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let record: ElapsedRecord = serde_json::from_str(&contents).unwrap();
        assert_eq!(record.session_seconds, 2);
    }

    #[test]
    fn test_record_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::in_data_dir(temp_dir.path());

        sink.record(10).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != SESSION_SECONDS_FILE)
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only the sink file, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_noop_sink_accepts_records() {
        let mut sink = NoopSink;
        sink.record(0).unwrap();
        sink.record(u32::MAX).unwrap();
    }
}
