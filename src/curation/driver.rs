use super::enrichment::enrich_knowledge;
use super::io::{cache_output_path, read_seed_dialogues, CurationWriter};
use super::run_log::{hash_file, CurationEventType, CurationRunLog};
use super::{CurationIssue, CurationIssueReason, CurationSummary};
use crate::config::CuratorConfig;
use crate::error::CurationError;
use crate::graph::GraphFactProvider;
use crate::knowledge::KnowledgeSelector;
use crate::models::{ConversationContext, CurationRecord, Domain, SeedDialogue};
use crate::profiles::{normalize_profile, sample_profile_with_fallback, SlotCatalog};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::path::Path;
use tracing::{info, warn};

/// Turns seed dialogue files into curated JSONL files.
///
/// A single random stream seeded from `curation.random_seed` drives the whole
/// run, so identical inputs and seed give identical outputs.
pub struct CurationDriver<'a> {
    config: &'a CuratorConfig,
    catalog: &'a SlotCatalog,
    graph: Option<&'a dyn GraphFactProvider>,
    selector: KnowledgeSelector,
}

impl<'a> CurationDriver<'a> {
    pub fn new(
        config: &'a CuratorConfig,
        catalog: &'a SlotCatalog,
        graph: Option<&'a dyn GraphFactProvider>,
    ) -> Self {
        let selector = KnowledgeSelector {
            token_budget: config.curation.token_budget,
            stars_max_tokens: config.curation.stars_max_tokens,
            exclusions: config.exclusions.clone(),
        };
        Self {
            config,
            catalog,
            graph,
            selector,
        }
    }

    pub fn run(&self) -> Result<CurationSummary> {
        let paths = &self.config.paths;
        let run_log = CurationRunLog::for_dir(&paths.cache_dir);
        let mut rng = StdRng::seed_from_u64(self.config.curation.random_seed);
        let mut summary = CurationSummary::default();

        run_log.record(
            CurationEventType::RunStarted,
            json!({
                "seed_files": paths.seed_files,
                "instances_per_seed": self.config.curation.instances_per_seed,
                "token_budget": self.config.curation.token_budget,
                "random_seed": self.config.curation.random_seed,
                "graph": self.graph.is_some(),
            }),
        )?;
        info!(
            run_id = %run_log.run_id(),
            events = %run_log.path().display(),
            "curation run started"
        );

        for seed_path in paths.seed_paths() {
            if !seed_path.exists() {
                warn!(path = %seed_path.display(), "seed file not found, skipping");
                summary.issues.push(CurationIssue::new(
                    seed_path.clone(),
                    CurationIssueReason::MissingSeedFile,
                    "seed file not found",
                ));
                continue;
            }
            self.curate_file(&seed_path, &run_log, &mut rng, &mut summary)?;
        }

        run_log.record(
            CurationEventType::RunCompleted,
            json!({
                "seeds_read": summary.seeds_read,
                "records_written": summary.records_written,
                "skipped_lines": summary.skipped_lines,
                "failed_seeds": summary.failed_seeds,
            }),
        )?;
        info!(
            seeds = summary.seeds_read,
            records = summary.records_written,
            skipped = summary.skipped_lines,
            failed = summary.failed_seeds,
            "curation run completed"
        );
        Ok(summary)
    }

    fn curate_file(
        &self,
        seed_path: &Path,
        run_log: &CurationRunLog,
        rng: &mut StdRng,
        summary: &mut CurationSummary,
    ) -> Result<()> {
        let output_path = cache_output_path(&self.config.paths.cache_dir, seed_path);
        let mut writer = CurationWriter::create(&output_path)?;
        info!(input = %seed_path.display(), output = %output_path.display(), "curating seed file");

        for parsed in read_seed_dialogues(seed_path)? {
            let seed = match parsed {
                Ok(seed) => seed,
                Err(err) => {
                    warn!(
                        path = %seed_path.display(),
                        error = %err,
                        "skipping malformed seed line"
                    );
                    summary.skipped_lines += 1;
                    run_log.record(
                        CurationEventType::SeedSkipped,
                        json!({ "file": seed_path, "error": err.to_string() }),
                    )?;
                    summary
                        .issues
                        .push(CurationIssue::from_error(seed_path, None, err));
                    continue;
                }
            };
            summary.seeds_read += 1;

            match self.curate_seed(&seed, rng) {
                Ok(records) => {
                    for record in &records {
                        writer.write_record(record)?;
                    }
                    summary.records_written += records.len();
                }
                Err(err) => {
                    let seed_id = seed.id.to_string();
                    warn!(seed = %seed_id, error = %err, "seed not curated");
                    summary.failed_seeds += 1;
                    let event = match err {
                        CurationError::InvalidDomain { .. } => CurationEventType::SeedSkipped,
                        _ => CurationEventType::SeedFailed,
                    };
                    run_log.record(
                        event,
                        json!({ "file": seed_path, "seed": seed_id, "error": err.to_string() }),
                    )?;
                    summary
                        .issues
                        .push(CurationIssue::from_error(seed_path, Some(seed_id), err));
                }
            }
        }

        let records = writer.records_written();
        drop(writer);
        run_log.record(
            CurationEventType::OutputCompleted,
            json!({
                "input": seed_path,
                "output": output_path,
                "records": records,
                "sha256": hash_file(&output_path)?,
            }),
        )?;
        Ok(())
    }

    /// All curation instances of one seed, or the first error among them.
    pub fn curate_seed(
        &self,
        seed: &SeedDialogue,
        rng: &mut StdRng,
    ) -> Result<Vec<CurationRecord>, CurationError> {
        let domain = seed.target.domain()?;
        (0..self.config.curation.instances_per_seed)
            .map(|index| self.curate_with_retries(seed, domain, index, rng))
            .collect()
    }

    fn curate_with_retries(
        &self,
        seed: &SeedDialogue,
        domain: Domain,
        index: usize,
        rng: &mut StdRng,
    ) -> Result<CurationRecord, CurationError> {
        let attempts = self.config.curation.max_graph_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.curate_instance(seed, domain, index, rng) {
                Err(CurationError::GraphQueryFailure { subject, reason }) if attempt < attempts => {
                    warn!(
                        seed = %seed.id,
                        index,
                        attempt,
                        subject = %subject,
                        reason = %reason,
                        "graph query failed, retrying instance"
                    );
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// One curated instance: persona, grounded knowledge, optional enrichment.
    pub fn curate_instance(
        &self,
        seed: &SeedDialogue,
        domain: Domain,
        index: usize,
        rng: &mut StdRng,
    ) -> Result<CurationRecord, CurationError> {
        let profile = if index == 0 {
            normalize_profile(&seed.user_profile, domain)
        } else {
            sample_profile_with_fallback(self.catalog, &seed.target.topic, domain, rng)?
        };

        let mut knowledge = self.selector.select(
            &seed.knowledge_graph,
            &seed.target,
            &seed.topic_path,
            &ConversationContext::empty(),
            rng,
        )?;
        if let Some(graph) = self.graph {
            enrich_knowledge(graph, &seed.target, &profile, &mut knowledge, rng)?;
        }

        Ok(CurationRecord::from_seed(seed, index, profile, knowledge))
    }
}
