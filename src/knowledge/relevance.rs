//! Relevance pass: which pool facts the conversation is actually about.
//!
//! Rules live in [`RELEVANCE_RULES`] and are evaluated in that order; a fact is
//! selected by the first rule that matches. Relation-specific handling for the
//! "relation is mentioned" rule lives in [`FIRST_TOPIC_MENTION_POLICIES`].

use super::filter::{is_excluded, RelevanceExclusion};
use super::topic::Transition;
use crate::models::{ConversationContext, Target, Triple};
use std::collections::HashSet;
use tracing::debug;

/// Marks temperature facts (weather grounding).
pub const TEMPERATURE_MARKER: &str = "℃";

pub const PERFECT_FOR_HAVING: &str = "Perfect for having";

/// Everything a rule may look at besides the fact itself.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceScope<'a> {
    pub target: &'a Target,
    pub context: &'a ConversationContext,
    pub first_topic: Option<&'a str>,
    pub transitions: &'a [Transition<'a>],
}

impl<'a> RelevanceScope<'a> {
    fn touches_first_topic(&self, fact: &Triple) -> bool {
        self.first_topic.map_or(false, |first| fact.touches(first))
    }

    fn subject_is_first_topic(&self, fact: &Triple) -> bool {
        self.first_topic == Some(fact.subject.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceRule {
    /// Subject or object is the target topic.
    TargetTopic,
    /// Temperature fact while the bot talks about temperature.
    TemperatureMarker,
    /// "Perfect for having" fact whose object is mentioned.
    PerfectForHaving,
    /// The relation name is mentioned; see [`FIRST_TOPIC_MENTION_POLICIES`].
    RelationMention,
    /// Fact about the first topic whose object the bot mentions.
    FirstTopicObjectMention,
    /// Fact linking two consecutive topics of the path.
    TopicTransition,
}

pub const RELEVANCE_RULES: [RelevanceRule; 6] = [
    RelevanceRule::TargetTopic,
    RelevanceRule::TemperatureMarker,
    RelevanceRule::PerfectForHaving,
    RelevanceRule::RelationMention,
    RelevanceRule::FirstTopicObjectMention,
    RelevanceRule::TopicTransition,
];

/// How a mentioned relation is treated when the fact's subject is the first topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionPolicy {
    Never,
    RequireBotMentionOfObject,
}

pub const FIRST_TOPIC_MENTION_POLICIES: [(&str, MentionPolicy); 3] = [
    ("Sings", MentionPolicy::Never),
    ("Achievement", MentionPolicy::RequireBotMentionOfObject),
    ("Awards", MentionPolicy::RequireBotMentionOfObject),
];

fn mention_policy(relation: &str) -> Option<MentionPolicy> {
    FIRST_TOPIC_MENTION_POLICIES
        .iter()
        .find(|(name, _)| *name == relation)
        .map(|(_, policy)| *policy)
}

impl RelevanceRule {
    pub fn matches(&self, fact: &Triple, scope: &RelevanceScope<'_>) -> bool {
        let ctx = scope.context;
        match self {
            RelevanceRule::TargetTopic => fact.touches(&scope.target.topic),
            RelevanceRule::TemperatureMarker => {
                fact.object.contains(TEMPERATURE_MARKER) && ctx.bot_contains(TEMPERATURE_MARKER)
            }
            RelevanceRule::PerfectForHaving => {
                fact.relation == PERFECT_FOR_HAVING && ctx.either_mentions(&fact.object)
            }
            RelevanceRule::RelationMention => {
                if !ctx.either_mentions(&fact.relation) {
                    return false;
                }
                let policy = if scope.subject_is_first_topic(fact) {
                    mention_policy(&fact.relation)
                } else {
                    None
                };
                match policy {
                    Some(MentionPolicy::Never) => false,
                    Some(MentionPolicy::RequireBotMentionOfObject) => {
                        ctx.bot_mentions(&fact.object)
                    }
                    None => scope.touches_first_topic(fact),
                }
            }
            RelevanceRule::FirstTopicObjectMention => {
                scope.subject_is_first_topic(fact) && ctx.bot_mentions(&fact.object)
            }
            RelevanceRule::TopicTransition => scope
                .transitions
                .iter()
                .any(|transition| transition.links(&fact.subject, &fact.object)),
        }
    }
}

/// First rule in table order that selects the fact.
pub fn first_matching_rule(fact: &Triple, scope: &RelevanceScope<'_>) -> Option<RelevanceRule> {
    RELEVANCE_RULES
        .iter()
        .copied()
        .find(|rule| rule.matches(fact, scope))
}

/// Selects relevant facts in pool order, without duplicate triples.
pub fn relevance_pass(
    pool: &[Triple],
    scope: &RelevanceScope<'_>,
    exclusions: &[RelevanceExclusion],
) -> Vec<Triple> {
    let mut seen: HashSet<&Triple> = HashSet::new();
    let mut selected = Vec::new();
    for fact in pool {
        if is_excluded(exclusions, scope.target, fact) || seen.contains(fact) {
            continue;
        }
        if let Some(rule) = first_matching_rule(fact, scope) {
            debug!(?rule, fact = %fact, "relevant fact");
            seen.insert(fact);
            selected.push(fact.clone());
        }
    }
    selected
}
