use super::budget::{pad_with_noise, DEFAULT_TOKEN_BUDGET};
use super::coverage::complete_coverage;
use super::filter::{default_exclusions, prefilter, RelevanceExclusion, DEFAULT_STARS_MAX_TOKENS};
use super::relevance::{relevance_pass, RelevanceScope};
use super::topic::TopicPath;
use super::CuratedFactSet;
use crate::error::CurationError;
use crate::models::{ConversationContext, Target, Triple};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Turns a raw fact pool into a bounded, topic-covering fact set.
#[derive(Debug, Clone)]
pub struct KnowledgeSelector {
    pub token_budget: usize,
    pub stars_max_tokens: usize,
    pub exclusions: Vec<RelevanceExclusion>,
}

impl Default for KnowledgeSelector {
    fn default() -> Self {
        Self {
            token_budget: DEFAULT_TOKEN_BUDGET,
            stars_max_tokens: DEFAULT_STARS_MAX_TOKENS,
            exclusions: default_exclusions(),
        }
    }
}

impl KnowledgeSelector {
    pub fn with_budget(token_budget: usize) -> Self {
        Self {
            token_budget,
            ..Self::default()
        }
    }

    /// Selects the knowledge for one curation instance.
    ///
    /// Steps: drop long cast lists, run the relevance pass, add one fact per
    /// uncovered topic, pad with noise up to the budget, shuffle. Random draws
    /// happen in that order (coverage picks, noise shuffle, final shuffle).
    pub fn select<R: Rng + ?Sized>(
        &self,
        raw_pool: &[Triple],
        target: &Target,
        topic_path: &[String],
        context: &ConversationContext,
        rng: &mut R,
    ) -> Result<CuratedFactSet, CurationError> {
        target.domain()?;

        let pool = prefilter(raw_pool, self.stars_max_tokens);
        let path = TopicPath::new(topic_path);
        let transitions = path.transitions();
        let scope = RelevanceScope {
            target,
            context,
            first_topic: path.first_topic(),
            transitions: &transitions,
        };

        let mut selected = relevance_pass(&pool, &scope, &self.exclusions);
        let relevant = selected.len();
        let coverage = complete_coverage(&pool, &mut selected, &path, rng);
        let noise = pad_with_noise(&pool, &selected, self.token_budget, rng);
        debug!(
            pool = pool.len(),
            relevant,
            coverage,
            noise = noise.len(),
            "selected knowledge"
        );

        selected.extend(noise);
        selected.shuffle(rng);
        Ok(selected)
    }
}
