use super::GraphFactProvider;
use crate::error::CurationError;
use crate::models::Triple;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Triple store held in memory; used for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    facts: Vec<Triple>,
}

impl InMemoryGraph {
    pub fn new(facts: Vec<Triple>) -> Self {
        Self { facts }
    }

    /// Loads triples from a JSON array or from JSONL (one `[s, r, o]` per line).
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Unable to read triple file {:?}", path))?;
        if is_triple_array(&data) {
            let facts: Vec<Triple> = serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse triple array {:?}", path))?;
            return Ok(Self::new(facts));
        }
        let mut facts = Vec::new();
        for (idx, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fact: Triple = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse triple on line {}", idx + 1))?;
            facts.push(fact);
        }
        Ok(Self::new(facts))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// A JSON array of triples opens with `[` followed, after any whitespace, by
/// another `[`. A JSONL line opens with `[` followed by a string.
fn is_triple_array(data: &str) -> bool {
    data.trim_start()
        .strip_prefix('[')
        .is_some_and(|rest| rest.trim_start().starts_with('['))
}

impl GraphFactProvider for InMemoryGraph {
    fn raw_facts(&self, subject: &str, relations: &[&str]) -> Result<Vec<Triple>, CurationError> {
        Ok(self
            .facts
            .iter()
            .filter(|fact| fact.subject == subject && relations.contains(&fact.relation.as_str()))
            .cloned()
            .collect())
    }
}
