use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use dialogcurator::logging;
use dialogcurator::profiles::SlotCatalog;

/// Build the profile slot catalog from seed dialogue files.
#[derive(Parser, Debug)]
#[command(name = "extract_slots", version)]
struct Cli {
    /// Where the catalog JSON is written.
    #[arg(short, long)]
    output: PathBuf,

    /// Seed dialogue JSONL files.
    #[arg(required = true)]
    seed_files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(false);

    if let Some(missing) = cli.seed_files.iter().find(|path| !path.exists()) {
        bail!("Seed file {:?} does not exist", missing);
    }
    let catalog = SlotCatalog::extract(&cli.seed_files)?;
    catalog.save(&cli.output)?;
    println!(
        "Saved {} profile slots to {}",
        catalog.len(),
        cli.output.display()
    );
    Ok(())
}
