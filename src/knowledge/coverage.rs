use super::topic::TopicPath;
use crate::models::Triple;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

fn covered_entities(facts: &[Triple]) -> HashSet<&str> {
    facts
        .iter()
        .flat_map(|fact| [fact.subject.as_str(), fact.object.as_str()])
        .collect()
}

/// Path entities that appear in no fact as subject or object, in path order.
pub fn uncovered_topics<'a>(facts: &[Triple], path: &TopicPath<'a>) -> Vec<&'a str> {
    let covered = covered_entities(facts);
    path.entities()
        .into_iter()
        .filter(|topic| !covered.contains(topic))
        .collect()
}

pub fn is_covered(facts: &[Triple], path: &TopicPath<'_>) -> bool {
    uncovered_topics(facts, path).is_empty()
}

/// Adds one uniformly drawn pool fact for every uncovered path entity.
///
/// Entities are visited in path order and re-checked before each draw, so a
/// fact picked for one entity can cover a later one and no triple is added
/// twice. Entities with no fact in the pool stay uncovered.
pub fn complete_coverage<R: Rng + ?Sized>(
    pool: &[Triple],
    selected: &mut Vec<Triple>,
    path: &TopicPath<'_>,
    rng: &mut R,
) -> usize {
    let mut added = 0;
    for topic in uncovered_topics(selected, path) {
        if selected.iter().any(|fact| fact.touches(topic)) {
            continue;
        }
        let candidates: Vec<&Triple> = pool.iter().filter(|fact| fact.touches(topic)).collect();
        if let Some(pick) = candidates.choose(rng) {
            selected.push((*pick).clone());
            added += 1;
        }
    }
    added
}
