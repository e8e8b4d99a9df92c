use crate::error::CurationError;
use crate::graph::GraphFactProvider;
use crate::models::profile::ACCEPTED_POI;
use crate::models::{ProfileRecord, Target, Triple};
use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

pub const COMMENTS_RELATION: &str = "Comments";

const MEDIA_RELATIONS: [&str; 4] = ["Stars", "Sings", "Type", COMMENTS_RELATION];
const CELEBRITY_RELATIONS: [&str; 3] = ["Intro", "Achievement", COMMENTS_RELATION];
const VENUE_RELATIONS: [&str; 4] = ["Price per person", "Rating", "Address", COMMENTS_RELATION];

/// Relations looked up in the graph for the entities named by a profile slot.
///
/// Slots that name no graph entities (name, age, residence, ...) get `None`.
pub fn profile_relations(slot_key: &str) -> Option<&'static [&'static str]> {
    if slot_key.contains("movies") || slot_key.contains("music") {
        Some(&MEDIA_RELATIONS)
    } else if slot_key.contains("celebrities") {
        Some(&CELEBRITY_RELATIONS)
    } else if slot_key.contains("food") || slot_key == ACCEPTED_POI {
        Some(&VENUE_RELATIONS)
    } else {
        None
    }
}

/// Counts of facts added by [`enrich_knowledge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub target_comment: bool,
    pub profile_facts: usize,
}

/// Extends a curated fact set with graph facts about the target and the persona.
///
/// One comment on the target topic is appended when the graph has any. Then
/// every entity the profile names contributes one random fact. A fact already
/// present in `knowledge` is never added twice.
pub fn enrich_knowledge(
    graph: &dyn GraphFactProvider,
    target: &Target,
    profile: &ProfileRecord,
    knowledge: &mut Vec<Triple>,
    rng: &mut dyn RngCore,
) -> Result<EnrichmentReport, CurationError> {
    let mut report = EnrichmentReport::default();

    let comments = graph.query(&target.topic, &[COMMENTS_RELATION], rng)?;
    if let Some(comment) = comments.choose(rng) {
        if !knowledge.contains(comment) {
            knowledge.push(comment.clone());
            report.target_comment = true;
        }
    }

    for (slot_key, entities) in profile.iter() {
        let Some(relations) = profile_relations(slot_key) else {
            continue;
        };
        for entity in entities {
            let facts = graph.query(entity, relations, rng)?;
            let Some(pick) = facts.choose(rng) else {
                continue;
            };
            if !knowledge.contains(pick) {
                knowledge.push(pick.clone());
                report.profile_facts += 1;
            }
        }
    }

    debug!(
        topic = %target.topic,
        target_comment = report.target_comment,
        profile_facts = report.profile_facts,
        "enriched knowledge"
    );
    Ok(report)
}
