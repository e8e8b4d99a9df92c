//! Read-only access to the knowledge graph.
//!
//! The curation engine asks one question of a triple store: "facts with this
//! subject and any of these relations". Providers return raw rows; [`GraphFactProvider::query`]
//! collapses them to a single, randomly chosen object per `(subject, relation)`.

pub mod memory;
pub mod neo4j;

pub use memory::InMemoryGraph;
pub use neo4j::Neo4jGraph;

use crate::error::CurationError;
use crate::models::Triple;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::RngCore;

pub trait GraphFactProvider {
    /// Every stored `(subject, relation, object)` row matching the pattern.
    fn raw_facts(&self, subject: &str, relations: &[&str]) -> Result<Vec<Triple>, CurationError>;

    /// Matching facts with one object per `(subject, relation)` edge.
    fn query(
        &self,
        subject: &str,
        relations: &[&str],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Triple>, CurationError> {
        let rows = self.raw_facts(subject, relations)?;
        Ok(collapse_edges(rows, rng))
    }
}

/// Keeps one uniformly drawn object per `(subject, relation)`, in first-seen order.
pub fn collapse_edges(rows: Vec<Triple>, rng: &mut dyn RngCore) -> Vec<Triple> {
    let mut edges: IndexMap<(String, String), Vec<String>> = IndexMap::new();
    for row in rows {
        edges
            .entry((row.subject, row.relation))
            .or_default()
            .push(row.object);
    }
    edges
        .into_iter()
        .filter_map(|((subject, relation), objects)| {
            objects
                .choose(rng)
                .map(|object| Triple::new(subject, relation, object.clone()))
        })
        .collect()
}
