use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::session::PlayRecord;

/// On-disk shape of a record log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordLogFile {
    pub started_at: DateTime<Utc>,
    pub records: Vec<PlayRecord>,
}

/// Append-only log of finished plays, one JSON file per log session.
///
/// Files are named `Session_YYYY_MM_DD_HH_MM_SS.json` after the start time
/// and rewritten in full on every append.
#[derive(Debug)]
pub struct RecordLog {
    base_dir: PathBuf,
    current: Option<(PathBuf, RecordLogFile)>,
}

impl RecordLog {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            current: None,
        }
    }

    /// Start a new log file, replacing any current one
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;

        let path = self
            .base_dir
            .join(format!("Session_{}.json", now.format("%Y_%m_%d_%H_%M_%S")));
        let file = RecordLogFile {
            started_at: now,
            records: Vec::new(),
        };
        fs::write(&path, serde_json::to_string_pretty(&file)?)?;
        info!("Recording plays to {}", path.display());

        self.current = Some((path.clone(), file));
        Ok(path)
    }

    /// Append a record, starting a log stamped with the record's time if none is open
    pub fn append(&mut self, record: PlayRecord) -> Result<()> {
        if self.current.is_none() {
            self.start(record.timestamp)?;
        }

        if let Some((path, file)) = &mut self.current {
            let mut updated = file.clone();
            updated.records.push(record);
            fs::write(&*path, serde_json::to_string_pretty(&updated)?)?;
            *file = updated;
        }
        Ok(())
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|(path, _)| path.as_path())
    }

    pub fn records(&self) -> &[PlayRecord] {
        self.current
            .as_ref()
            .map(|(_, file)| file.records.as_slice())
            .unwrap_or(&[])
    }

    /// Read a log file written by `RecordLog`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RecordLogFile> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
