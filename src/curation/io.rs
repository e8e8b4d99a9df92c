use crate::error::CurationError;
use crate::models::{CurationRecord, SeedDialogue};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Parses a seed dialogue file line by line.
///
/// Blank lines are ignored. A line that fails to parse becomes a
/// `MalformedRecord` entry so the caller can log it and continue; only I/O
/// failures abort.
pub fn read_seed_dialogues(path: &Path) -> Result<Vec<Result<SeedDialogue, CurationError>>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Unable to read seed file {:?}", path))?;
    Ok(data
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<SeedDialogue>(line).map_err(|err| {
                CurationError::MalformedRecord {
                    line: idx + 1,
                    reason: err.to_string(),
                }
            })
        })
        .collect())
}

/// Output file for a seed file: `<cache_dir>/cache_<file name>`.
pub fn cache_output_path(cache_dir: &Path, seed_path: &Path) -> PathBuf {
    let name = seed_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("seed_dialogue.jsonl");
    cache_dir.join(format!("cache_{name}"))
}

/// Writes curated records as JSONL, flushing after every record.
pub struct CurationWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl CurationWriter {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file =
            File::create(path).with_context(|| format!("Unable to create {:?}", path))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn write_record(&mut self, record: &CurationRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer
            .flush()
            .with_context(|| format!("Unable to flush {:?}", self.path))?;
        self.written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.written
    }
}

/// Reads a curated output file back; used to verify runs.
pub fn read_curation_records(path: &Path) -> Result<Vec<CurationRecord>> {
    let data =
        fs::read_to_string(path).with_context(|| format!("Unable to read {:?}", path))?;
    let mut records = Vec::new();
    for line in data.lines().filter(|l| !l.trim().is_empty()) {
        let record: CurationRecord =
            serde_json::from_str(line).with_context(|| "Failed to parse curated record")?;
        records.push(record);
    }
    Ok(records)
}
