//! Knowledge grounding: from a seed dialogue's fact pool to the bounded,
//! topic-covering fact list handed to the dialogue generator.

pub mod budget;
pub mod coverage;
pub mod filter;
pub mod relevance;
pub mod selector;
pub mod topic;

pub use budget::{budget_usage, exceeds_budget, pad_with_noise, DEFAULT_TOKEN_BUDGET};
pub use coverage::{complete_coverage, is_covered, uncovered_topics};
pub use filter::{default_exclusions, prefilter, RelevanceExclusion, DEFAULT_STARS_MAX_TOKENS};
pub use relevance::{
    first_matching_rule, relevance_pass, MentionPolicy, RelevanceRule, RelevanceScope,
    FIRST_TOPIC_MENTION_POLICIES, RELEVANCE_RULES,
};
pub use selector::KnowledgeSelector;
pub use topic::{TopicPath, Transition};

use crate::models::Triple;

/// Curated facts in delivery order; no triple appears twice.
pub type CuratedFactSet = Vec<Triple>;
