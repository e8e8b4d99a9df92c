use super::support::{chitchat_seed, food_seed, movie_seed};
use super::IntegrationHarness;
use anyhow::Result;
use dialogcurator::curation::{
    cache_output_path, hash_file, prepare_catalog, read_curation_records, CurationDriver,
    CurationEventType, CurationIssueReason, CurationRunLog,
};
use dialogcurator::knowledge::{budget_usage, is_covered, TopicPath};
use dialogcurator::models::profile::{
    ACCEPTED_CELEBRITIES, ACCEPTED_FOOD, ACCEPTED_MOVIES, ACCEPTED_MUSIC, AGE_RANGE, OCCUPATION,
};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;

const SEED_FILE: &str = "seed_dialogue_dev.jsonl";

fn seed_lines() -> Vec<Value> {
    vec![
        movie_seed(1),
        Value::String(r#"{"id": 2}"#.into()),
        chitchat_seed(4),
        food_seed(3),
    ]
}

#[test]
fn curation_run_writes_every_instance_and_skips_bad_seeds() -> Result<()> {
    let harness = IntegrationHarness::new();
    let seed_path = harness.write_seed_file(SEED_FILE, &seed_lines());
    let config = harness.config(&[SEED_FILE]);

    let catalog = prepare_catalog(&config)?;
    assert!(config.paths.catalog_path().exists());
    let summary = CurationDriver::new(&config, &catalog, None).run()?;

    assert_eq!(summary.seeds_read, 3);
    assert_eq!(summary.records_written, 6);
    assert_eq!(summary.skipped_lines, 1);
    assert_eq!(summary.failed_seeds, 1);
    let reasons: Vec<CurationIssueReason> = summary.issues.iter().map(|i| i.reason).collect();
    assert_eq!(
        reasons,
        vec![CurationIssueReason::MalformedRecord, CurationIssueReason::InvalidDomain]
    );

    let output = cache_output_path(&config.paths.cache_dir, &seed_path);
    let records = read_curation_records(&output)?;
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1_0", "1_1", "1_2", "3_0", "3_1", "3_2"]);

    let seed_persona = &records[0].user_profile;
    assert_eq!(seed_persona.joined(AGE_RANGE).unwrap(), "18-25");
    assert_eq!(
        seed_persona.joined(ACCEPTED_CELEBRITIES).unwrap(),
        "Jet Li; Zhang Ziyi"
    );
    assert_eq!(seed_persona.joined(ACCEPTED_MUSIC).unwrap(), "Jay Chou");
    assert!(!seed_persona.contains_key("Accepted Music"));
    assert!(!seed_persona.contains_key(ACCEPTED_FOOD));
    assert!(!seed_persona.contains_key("Accepted news"));

    for record in &records {
        let path = TopicPath::new(&record.seed_topic_path);
        assert!(is_covered(&record.knowledge, &path), "{} misses a topic", record.id);
        assert!(budget_usage(&record.knowledge) <= config.curation.token_budget);
        let unique: HashSet<_> = record.knowledge.iter().collect();
        assert_eq!(unique.len(), record.knowledge.len());
    }
    for record in records.iter().filter(|r| !r.id.ends_with("_0")) {
        assert!(record.user_profile.contains_key(OCCUPATION));
        let names = record.user_profile.joined(ACCEPTED_FOOD).unwrap_or_default();
        assert!(!names.contains("Marinated Fish"));
    }
    for record in records.iter().filter(|r| r.id.starts_with("3_")) {
        assert!(!record.user_profile.contains_key(ACCEPTED_MOVIES));
    }
    Ok(())
}

#[test]
fn curation_run_log_records_the_run() -> Result<()> {
    let harness = IntegrationHarness::new();
    let seed_path = harness.write_seed_file(SEED_FILE, &seed_lines());
    let config = harness.config(&[SEED_FILE]);
    let catalog = prepare_catalog(&config)?;
    CurationDriver::new(&config, &catalog, None).run()?;

    let events = CurationRunLog::for_dir(&config.paths.cache_dir).list()?;
    let kinds: Vec<CurationEventType> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        kinds,
        vec![
            CurationEventType::RunStarted,
            CurationEventType::SeedSkipped,
            CurationEventType::SeedSkipped,
            CurationEventType::OutputCompleted,
            CurationEventType::RunCompleted,
        ]
    );
    let run_id = events[0].run_id;
    assert!(events.iter().all(|e| e.run_id == run_id));

    let output = cache_output_path(&config.paths.cache_dir, &seed_path);
    assert_eq!(events[3].details["records"], 6);
    assert_eq!(events[3].details["sha256"], hash_file(&output)?);
    Ok(())
}

#[test]
fn identical_seeds_reproduce_identical_files() -> Result<()> {
    let harness = IntegrationHarness::new();
    let seed_path = harness.write_seed_file(SEED_FILE, &seed_lines());

    let mut outputs = Vec::new();
    for run in ["first", "second"] {
        let mut config = harness.config(&[SEED_FILE]);
        config.paths.cache_dir = harness.workspace_path().join(run);
        let catalog = prepare_catalog(&config)?;
        CurationDriver::new(&config, &catalog, None).run()?;
        outputs.push(fs::read_to_string(cache_output_path(
            &config.paths.cache_dir,
            &seed_path,
        ))?);
    }
    assert_eq!(outputs[0], outputs[1]);
    Ok(())
}

#[test]
fn missing_seed_files_are_reported_and_skipped() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.write_seed_file(SEED_FILE, &[movie_seed(1)]);
    let mut config = harness.config(&["seed_dialogue_test_seen.jsonl", SEED_FILE]);
    config.curation.instances_per_seed = 1;

    let catalog = prepare_catalog(&config)?;
    let summary = CurationDriver::new(&config, &catalog, None).run()?;

    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.issues.len(), 1);
    assert_eq!(summary.issues[0].reason, CurationIssueReason::MissingSeedFile);
    assert!(!config
        .paths
        .cache_dir
        .join("cache_seed_dialogue_test_seen.jsonl")
        .exists());
    assert!(summary.describe().contains("1 records"));
    Ok(())
}
