use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const RUN_LOG_FILE_NAME: &str = "curation_events.jsonl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurationEventType {
    RunStarted,
    SeedSkipped,
    SeedFailed,
    OutputCompleted,
    RunCompleted,
}

/// One run-log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationEvent {
    pub event_id: Uuid,
    pub run_id: Uuid,
    pub event_type: CurationEventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// Append-only JSONL log of a curation run, kept next to the curated files.
pub struct CurationRunLog {
    run_id: Uuid,
    events_path: PathBuf,
}

impl CurationRunLog {
    pub fn for_dir(dir: &Path) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            events_path: dir.join(RUN_LOG_FILE_NAME),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn path(&self) -> &Path {
        &self.events_path
    }

    pub fn record(
        &self,
        event_type: CurationEventType,
        details: serde_json::Value,
    ) -> Result<Uuid> {
        let event = CurationEvent {
            event_id: Uuid::new_v4(),
            run_id: self.run_id,
            event_type,
            timestamp: Utc::now(),
            details,
        };
        if let Some(parent) = self.events_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.events_path)?;
        file.write_all(serde_json::to_string(&event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(event.event_id)
    }

    /// Events of every run recorded in this directory, oldest first.
    pub fn list(&self) -> Result<Vec<CurationEvent>> {
        if !self.events_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.events_path)
            .with_context(|| format!("Unable to read {:?}", self.events_path))?;
        let mut events = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            let event: CurationEvent = serde_json::from_str(line)
                .with_context(|| "Failed to parse curation event record")?;
            events.push(event);
        }
        Ok(events)
    }
}

/// SHA-256 of a file, hex encoded.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("Unable to open {} for hashing", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
