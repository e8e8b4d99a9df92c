use dialogcurator::config::CuratorConfig;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mod curation_run;
mod knowledge_selection;
mod neo4j_graph;
mod profile_normalization;
pub mod support;

pub struct IntegrationHarness {
    workspace: TempDir,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        Self { workspace }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn seed_dir(&self) -> PathBuf {
        self.workspace.path().join("seed_dataset")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.workspace.path().join("caches")
    }

    /// Writes one JSONL seed file; `Value::String` entries are written verbatim.
    pub fn write_seed_file(&self, name: &str, lines: &[Value]) -> PathBuf {
        let dir = self.seed_dir();
        fs::create_dir_all(&dir).expect("failed to create seed dir");
        let body: Vec<String> = lines
            .iter()
            .map(|line| match line {
                Value::String(raw) => raw.clone(),
                other => other.to_string(),
            })
            .collect();
        let path = dir.join(name);
        fs::write(&path, body.join("\n") + "\n").expect("failed to write seed file");
        path
    }

    /// Config pointing at the harness directories and the given seed files.
    pub fn config(&self, seed_files: &[&str]) -> CuratorConfig {
        let mut config = CuratorConfig::default();
        config.paths.seed_dataset_dir = self.seed_dir();
        config.paths.cache_dir = self.cache_dir();
        config.paths.seed_files = seed_files.iter().map(|name| name.to_string()).collect();
        config
    }
}
