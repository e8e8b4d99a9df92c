use crate::models::{Target, Triple};
use serde::{Deserialize, Serialize};

/// Relation whose objects are cast lists.
pub const STARS_RELATION: &str = "Stars";

/// Longest "Stars" object (in whitespace tokens) allowed into the pool.
pub const DEFAULT_STARS_MAX_TOKENS: usize = 40;

/// Drops "Stars" facts whose object is longer than `max_tokens` tokens.
pub fn prefilter(raw_pool: &[Triple], max_tokens: usize) -> Vec<Triple> {
    raw_pool
        .iter()
        .filter(|fact| {
            fact.relation != STARS_RELATION || fact.object.split_whitespace().count() <= max_tokens
        })
        .cloned()
        .collect()
}

/// A fact that must never be picked by the relevance pass for one target.
///
/// Entries are literal data fixes; coverage completion and noise padding may
/// still pick the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceExclusion {
    pub action: String,
    pub topic: String,
    pub relation: String,
    pub object: String,
}

impl RelevanceExclusion {
    pub fn applies_to(&self, target: &Target, fact: &Triple) -> bool {
        target.action == self.action
            && target.topic == self.topic
            && fact.relation == self.relation
            && fact.object == self.object
    }
}

/// Known data quirks shipped with every selector.
pub fn default_exclusions() -> Vec<RelevanceExclusion> {
    vec![RelevanceExclusion {
        action: "Food recommendation".into(),
        topic: "Marinated Fish".into(),
        relation: "Specials".into(),
        object: "Marinated Fish".into(),
    }]
}

pub fn is_excluded(exclusions: &[RelevanceExclusion], target: &Target, fact: &Triple) -> bool {
    exclusions
        .iter()
        .any(|exclusion| exclusion.applies_to(target, fact))
}
