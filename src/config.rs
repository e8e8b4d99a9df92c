//! Configuration for curation runs.
//!
//! Stored in a machine-readable TOML file located at:
//!   $DIALOGCURATOR_HOME/config/config.toml when the variable is set
//!   $XDG_DATA_HOME/DialogCurator/config/config.toml on Linux
//!   ~/Library/Application Support/DialogCurator/config/config.toml on macOS
//!   %APPDATA%/DialogCurator/config/config.toml on Windows
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use crate::knowledge::{
    default_exclusions, RelevanceExclusion, DEFAULT_STARS_MAX_TOKENS, DEFAULT_TOKEN_BUDGET,
};
use crate::profiles::default_catalog_path;
use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Standard file name of the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratorConfig {
    /// Sampling and selection knobs.
    #[serde(default)]
    pub curation: CurationSettings,
    /// Where seed dialogues are read and curated files are written.
    #[serde(default)]
    pub paths: PathSettings,
    /// Knowledge graph used to enrich curated knowledge.
    #[serde(default)]
    pub graph: GraphSettings,
    /// Facts the relevance pass must skip for specific targets.
    #[serde(default = "default_exclusions")]
    pub exclusions: Vec<RelevanceExclusion>,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            curation: CurationSettings::default(),
            paths: PathSettings::default(),
            graph: GraphSettings::default(),
            exclusions: default_exclusions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationSettings {
    /// Curated instances produced per seed dialogue; index 0 keeps the seed persona.
    #[serde(default = "default_instances_per_seed")]
    pub instances_per_seed: usize,
    /// Whitespace-token budget for curated knowledge.
    #[serde(default = "default_token_budget")]
    pub token_budget: usize,
    /// Seed of the run's random stream.
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
    /// Longest "Stars" object kept in the fact pool.
    #[serde(default = "default_stars_max_tokens")]
    pub stars_max_tokens: usize,
    /// Attempts per curation instance when the graph store fails.
    #[serde(default = "default_max_graph_attempts")]
    pub max_graph_attempts: u32,
}

impl Default for CurationSettings {
    fn default() -> Self {
        Self {
            instances_per_seed: default_instances_per_seed(),
            token_budget: default_token_budget(),
            random_seed: default_random_seed(),
            stars_max_tokens: default_stars_max_tokens(),
            max_graph_attempts: default_max_graph_attempts(),
        }
    }
}

const fn default_instances_per_seed() -> usize {
    3
}

const fn default_token_budget() -> usize {
    DEFAULT_TOKEN_BUDGET
}

const fn default_random_seed() -> u64 {
    42
}

const fn default_stars_max_tokens() -> usize {
    DEFAULT_STARS_MAX_TOKENS
}

const fn default_max_graph_attempts() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_seed_dataset_dir")]
    pub seed_dataset_dir: PathBuf,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Slot catalog location; `<cache_dir>/db_slot/slot_profiles.json` when unset.
    #[serde(default)]
    pub slot_catalog: Option<PathBuf>,
    /// Seed file names looked up under `seed_dataset_dir`.
    #[serde(default = "default_seed_files")]
    pub seed_files: Vec<String>,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            seed_dataset_dir: default_seed_dataset_dir(),
            cache_dir: default_cache_dir(),
            slot_catalog: None,
            seed_files: default_seed_files(),
        }
    }
}

impl PathSettings {
    pub fn catalog_path(&self) -> PathBuf {
        self.slot_catalog
            .clone()
            .unwrap_or_else(|| default_catalog_path(&self.cache_dir))
    }

    pub fn seed_paths(&self) -> Vec<PathBuf> {
        self.seed_files
            .iter()
            .map(|name| self.seed_dataset_dir.join(name))
            .collect()
    }
}

fn default_seed_dataset_dir() -> PathBuf {
    PathBuf::from("seed_dataset/DuRecDial2")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("seed_dataset/caches")
}

fn default_seed_files() -> Vec<String> {
    ["train", "dev", "test_seen", "test_unseen"]
        .iter()
        .map(|split| format!("seed_dialogue_{split}.jsonl"))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSettings {
    /// Profile and comment enrichment only runs when a graph is enabled.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_graph_url")]
    pub url: String,
    #[serde(default = "default_graph_database")]
    pub database: String,
    #[serde(default = "default_graph_credential")]
    pub username: String,
    #[serde(default = "default_graph_credential")]
    pub password: String,
    #[serde(default = "default_graph_timeout_secs")]
    pub timeout_secs: u64,
    /// Offline triple dump (JSON array or JSONL) used instead of the server.
    #[serde(default)]
    pub triples_file: Option<PathBuf>,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_graph_url(),
            database: default_graph_database(),
            username: default_graph_credential(),
            password: default_graph_credential(),
            timeout_secs: default_graph_timeout_secs(),
            triples_file: None,
        }
    }
}

fn default_graph_url() -> String {
    "http://localhost:7474".into()
}

fn default_graph_database() -> String {
    "neo4j".into()
}

fn default_graph_credential() -> String {
    "neo4j".into()
}

const fn default_graph_timeout_secs() -> u64 {
    30
}

/// Returns the root directory where DialogCurator keeps its config.
///
/// Order of precedence:
/// 1. `DIALOGCURATOR_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("DIALOGCURATOR_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("DialogCurator"))
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(workspace_root()?.join("config").join(CONFIG_FILE_NAME))
}

/// Loads the configuration from the default location or returns defaults.
pub fn load_or_default() -> Result<CuratorConfig> {
    let path = config_file_path()?;
    if path.exists() {
        load_from(&path)
    } else {
        Ok(CuratorConfig::default())
    }
}

pub fn load_from(path: &Path) -> Result<CuratorConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let cfg: CuratorConfig =
        toml::from_str(&data).with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(cfg)
}

/// Persists the configuration to `path`.
pub fn save(config: &CuratorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = toml::to_string_pretty(config)?;
    fs::write(path, data)?;
    Ok(())
}
