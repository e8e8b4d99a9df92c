use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dialogcurator::config::{self, CuratorConfig};
use dialogcurator::curation::{connect_graph, prepare_catalog, CurationDriver};
use dialogcurator::logging;

/// Curate seed dialogues into persona and knowledge grounded training records.
#[derive(Parser, Debug)]
#[command(name = "curate", version)]
struct Cli {
    /// Config file; defaults to the workspace config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed_dir: Option<PathBuf>,

    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Curated instances per seed dialogue.
    #[arg(long)]
    instances: Option<usize>,

    /// Token budget for curated knowledge.
    #[arg(long)]
    budget: Option<usize>,

    /// Random seed of the run.
    #[arg(long)]
    seed: Option<u64>,

    /// Neo4j HTTP URL; enables graph enrichment.
    #[arg(long)]
    graph_url: Option<String>,

    /// Triple dump (JSON or JSONL) used for enrichment instead of Neo4j.
    #[arg(long, conflicts_with = "graph_url")]
    graph_file: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut CuratorConfig) {
        if let Some(dir) = &self.seed_dir {
            config.paths.seed_dataset_dir = dir.clone();
        }
        if let Some(dir) = &self.cache_dir {
            config.paths.cache_dir = dir.clone();
        }
        if let Some(instances) = self.instances {
            config.curation.instances_per_seed = instances;
        }
        if let Some(budget) = self.budget {
            config.curation.token_budget = budget;
        }
        if let Some(seed) = self.seed {
            config.curation.random_seed = seed;
        }
        if let Some(url) = &self.graph_url {
            config.graph.url = url.clone();
            config.graph.enabled = true;
        }
        if let Some(path) = &self.graph_file {
            config.graph.triples_file = Some(path.clone());
            config.graph.enabled = true;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load_or_default()?,
    };
    cli.apply(&mut config);

    let catalog = prepare_catalog(&config)?;
    let graph = connect_graph(&config)?;
    let driver = CurationDriver::new(&config, &catalog, graph.as_deref());
    let summary = driver.run()?;

    println!("{}", summary.describe());
    Ok(())
}
