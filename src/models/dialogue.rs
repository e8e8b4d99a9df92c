use super::profile::ProfileRecord;
use super::target::Target;
use super::triple::Triple;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marks "no entity at this position" in a topic path.
pub const TOPIC_SENTINEL: &str = "NULL";

pub fn is_sentinel(topic: &str) -> bool {
    topic == TOPIC_SENTINEL
}

/// Seed ids are numeric in some dataset splits and textual in others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedId::Number(n) => write!(f, "{n}"),
            SeedId::Text(s) => f.write_str(s),
        }
    }
}

/// One line of a seed dialogue file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDialogue {
    pub id: SeedId,
    pub original_goal: String,
    pub user_profile: ProfileRecord,
    pub knowledge_graph: Vec<Triple>,
    pub target: Target,
    pub topic_path: Vec<String>,
    pub conversation: Vec<String>,
    pub action_path: Vec<String>,
}

/// One curated training instance, written as a JSONL line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationRecord {
    pub id: String,
    pub original_goal: String,
    pub user_profile: ProfileRecord,
    pub knowledge: Vec<Triple>,
    pub target: Target,
    pub seed_conversation: Vec<String>,
    pub seed_action_path: Vec<String>,
    pub seed_topic_path: Vec<String>,
}

impl CurationRecord {
    pub fn from_seed(
        seed: &SeedDialogue,
        index: usize,
        user_profile: ProfileRecord,
        knowledge: Vec<Triple>,
    ) -> Self {
        Self {
            id: format!("{}_{}", seed.id, index),
            original_goal: seed.original_goal.clone(),
            user_profile,
            knowledge,
            target: seed.target.clone(),
            seed_conversation: seed.conversation.clone(),
            seed_action_path: seed.action_path.clone(),
            seed_topic_path: seed.topic_path.clone(),
        }
    }
}

/// User and bot utterances the relevance pass matches facts against.
///
/// Matching is case-insensitive, so lowercase copies are kept alongside.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    user_lower: String,
    bot_lower: String,
    bot: String,
}

impl ConversationContext {
    pub fn new(user_utterance: impl Into<String>, bot_utterance: impl Into<String>) -> Self {
        let user: String = user_utterance.into();
        let bot: String = bot_utterance.into();
        Self {
            user_lower: user.to_lowercase(),
            bot_lower: bot.to_lowercase(),
            bot,
        }
    }

    /// Grounding without any utterance, as the curation driver uses it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Case-insensitive containment in the bot utterance.
    pub fn bot_mentions(&self, text: &str) -> bool {
        self.bot_lower.contains(&text.to_lowercase())
    }

    /// Case-insensitive containment in either utterance.
    pub fn either_mentions(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.user_lower.contains(&needle) || self.bot_lower.contains(&needle)
    }

    /// Case-sensitive containment in the bot utterance.
    pub fn bot_contains(&self, marker: &str) -> bool {
        self.bot.contains(marker)
    }
}
