//! Batch curation of seed dialogues into training instances.

pub mod driver;
pub mod enrichment;
pub mod io;
pub mod run_log;

pub use driver::CurationDriver;
pub use enrichment::{enrich_knowledge, profile_relations, EnrichmentReport};
pub use io::{cache_output_path, read_curation_records, read_seed_dialogues, CurationWriter};
pub use run_log::{hash_file, CurationEvent, CurationEventType, CurationRunLog};

use crate::config::CuratorConfig;
use crate::error::CurationError;
use crate::graph::{GraphFactProvider, InMemoryGraph, Neo4jGraph};
use crate::profiles::SlotCatalog;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurationIssueReason {
    MissingSeedFile,
    MalformedRecord,
    InvalidDomain,
    SamplingExhausted,
    GraphQueryFailure,
}

impl From<&CurationError> for CurationIssueReason {
    fn from(err: &CurationError) -> Self {
        match err {
            CurationError::InvalidDomain { .. } => Self::InvalidDomain,
            CurationError::SamplingExhausted { .. } => Self::SamplingExhausted,
            CurationError::MalformedRecord { .. } => Self::MalformedRecord,
            CurationError::GraphQueryFailure { .. } => Self::GraphQueryFailure,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CurationIssue {
    pub path: PathBuf,
    pub seed_id: Option<String>,
    pub reason: CurationIssueReason,
    pub message: String,
}

impl CurationIssue {
    pub fn new(path: PathBuf, reason: CurationIssueReason, message: impl Into<String>) -> Self {
        Self {
            path,
            seed_id: None,
            reason,
            message: message.into(),
        }
    }

    pub fn from_error(path: &Path, seed_id: Option<String>, err: CurationError) -> Self {
        Self {
            path: path.to_path_buf(),
            seed_id,
            reason: CurationIssueReason::from(&err),
            message: err.to_string(),
        }
    }
}

/// Result of a curation run.
#[derive(Debug, Clone, Default)]
pub struct CurationSummary {
    pub seeds_read: usize,
    pub records_written: usize,
    pub skipped_lines: usize,
    pub failed_seeds: usize,
    pub issues: Vec<CurationIssue>,
}

impl CurationSummary {
    pub fn describe(&self) -> String {
        let mut line = format!(
            "Curated {} seed dialogues into {} records (skipped {} lines, {} seeds failed).",
            self.seeds_read, self.records_written, self.skipped_lines, self.failed_seeds
        );
        if !self.issues.is_empty() {
            let preview: Vec<String> = self
                .issues
                .iter()
                .take(3)
                .map(|issue| match &issue.seed_id {
                    Some(id) => format!("{} #{}: {}", issue.path.display(), id, issue.message),
                    None => format!("{}: {}", issue.path.display(), issue.message),
                })
                .collect();
            line.push_str(&format!(" Issues: {}", preview.join("; ")));
            if self.issues.len() > preview.len() {
                line.push_str(&format!(" (+{} more)", self.issues.len() - preview.len()));
            }
        }
        line
    }
}

/// Loads the slot catalog, extracting it from the seed files first when the
/// catalog file does not exist yet.
pub fn prepare_catalog(config: &CuratorConfig) -> Result<SlotCatalog> {
    let path = config.paths.catalog_path();
    if path.exists() {
        return SlotCatalog::load(&path);
    }
    let seed_paths: Vec<PathBuf> = config
        .paths
        .seed_paths()
        .into_iter()
        .filter(|p| p.exists())
        .collect();
    info!(
        catalog = %path.display(),
        files = seed_paths.len(),
        "slot catalog missing, extracting from seed files"
    );
    let catalog = SlotCatalog::extract(&seed_paths)?;
    catalog.save(&path)?;
    Ok(catalog)
}

/// Opens the configured graph store, or `None` when enrichment is disabled.
pub fn connect_graph(config: &CuratorConfig) -> Result<Option<Box<dyn GraphFactProvider>>> {
    if !config.graph.enabled {
        return Ok(None);
    }
    if let Some(path) = &config.graph.triples_file {
        let graph = InMemoryGraph::load(path)?;
        info!(triples = graph.len(), file = %path.display(), "knowledge graph loaded from file");
        return Ok(Some(Box::new(graph)));
    }
    let graph = Neo4jGraph::new(&config.graph)
        .with_context(|| format!("Unable to configure graph at {}", config.graph.url))?;
    info!(endpoint = graph.endpoint(), "knowledge graph enrichment enabled");
    Ok(Some(Box::new(graph)))
}
