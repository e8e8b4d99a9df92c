//! Inputs for the dialogue simulator built from a curated record: assistant
//! persona, personality and the rendered seed conversation.

use crate::error::CurationError;
use crate::models::profile::NAME;
use crate::profiles::SlotCatalog;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::RegexBuilder;
use serde::Serialize;

/// Goals containing this phrase open with a user turn.
pub const USER_INITIATIVE: &str = "User Initiative";
pub const USER_ROLE: &str = "[Role-U]";
pub const SYSTEM_ROLE: &str = "[Role-S]";
pub const END_OF_UTTERANCE: &str = "<EOS>";

const TURN_MARKERS: [&str; 9] = ["[1]", "[2]", "[3]", "[4]", "[5]", "[6]", "[7]", "[8]", "[9]"];

/// Share of the seed conversation a continuation prefix may cover.
const CONTINUE_FRACTION: f64 = 0.6;

/// Big Five traits with their two poles.
const PERSONALITY_TRAITS: [(&str, [&str; 2]); 5] = [
    (
        "agreeableness",
        [
            "trustworthy, straightforward, and generous",
            "unreliable, complicated, meager, and boastful",
        ],
    ),
    (
        "conscientiousness",
        [
            "efficient, organized, and careful",
            "inefficient, careless, and sloppy",
        ],
    ),
    (
        "extraversion",
        [
            "outgoing, energetic, and talkative",
            "shy, reserved, and quiet",
        ],
    ),
    (
        "neuroticism",
        [
            "sensitive, nervous, and insecure",
            "secure, confident, and calm",
        ],
    ),
    (
        "openness",
        [
            "intellectual, imaginative, and curious",
            "unimaginative, uncreative, and conventional",
        ],
    ),
];

/// Trait name to the sampled description, in Big Five order.
pub type Personality = IndexMap<&'static str, &'static str>;

pub fn sample_personality<R: Rng + ?Sized>(rng: &mut R) -> Personality {
    PERSONALITY_TRAITS
        .iter()
        .map(|(name, poles)| (*name, poles[rng.gen_range(0..poles.len())]))
        .collect()
}

/// Draws an assistant name that does not share a whole word with the user's name.
pub fn sample_assistant_name<R: Rng + ?Sized>(
    catalog: &SlotCatalog,
    user_name: &str,
    rng: &mut R,
) -> Result<String, CurationError> {
    let candidates: Vec<&String> = catalog
        .values(NAME)
        .unwrap_or_default()
        .iter()
        .filter(|name| !names_overlap(name, user_name))
        .collect();
    candidates
        .choose(rng)
        .map(|name| name.to_string())
        .ok_or_else(|| CurationError::SamplingExhausted {
            slot: NAME.to_string(),
            topic: user_name.to_string(),
        })
}

/// Whole-word, case-insensitive occurrence of `candidate` in `user_name`.
fn names_overlap(candidate: &str, user_name: &str) -> bool {
    RegexBuilder::new(&format!(r"\b({})\b", regex::escape(candidate)))
        .case_insensitive(true)
        .build()
        .map(|re| re.is_match(user_name))
        .unwrap_or(false)
}

/// Strips leading `[n]` turn markers.
pub fn clean_utterance(utterance: &str) -> &str {
    let mut cleaned = utterance.trim();
    for marker in TURN_MARKERS {
        if let Some(rest) = cleaned.strip_prefix(marker) {
            cleaned = rest.trim();
        }
    }
    cleaned
}

/// Renders utterances as alternating `[Role-X]: text<EOS>` blocks.
pub fn render_conversation<S: AsRef<str>>(goal: &str, utterances: &[S]) -> String {
    let user_first = goal.contains(USER_INITIATIVE);
    let mut rendered = String::new();
    for (idx, utterance) in utterances.iter().enumerate() {
        let role = if (idx % 2 == 0) == user_first {
            USER_ROLE
        } else {
            SYSTEM_ROLE
        };
        rendered.push_str(&format!(
            "{role}: {}{END_OF_UTTERANCE}\n\n",
            clean_utterance(utterance.as_ref())
        ));
    }
    rendered
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedConversation {
    /// A random opening the simulator continues from.
    pub seed_continue: String,
    /// The full seed dialogue.
    pub seed_end: String,
}

pub fn sample_seed_conversation<S: AsRef<str>, R: Rng + ?Sized>(
    goal: &str,
    utterances: &[S],
    rng: &mut R,
) -> SeedConversation {
    let upper = (utterances.len() as f64 * CONTINUE_FRACTION) as usize;
    let continue_len = if upper > 1 { rng.gen_range(1..upper) } else { 1 };
    let continue_len = continue_len.min(utterances.len());
    SeedConversation {
        seed_continue: render_conversation(goal, &utterances[..continue_len]),
        seed_end: render_conversation(goal, utterances),
    }
}
