use super::catalog::SlotCatalog;
use super::normalize::normalize_profile;
use crate::error::CurationError;
use crate::models::profile::{AGE_RANGE, OCCUPATION};
use crate::models::{Domain, ProfileRecord};
use rand::seq::SliceRandom;
use rand::Rng;

const STUDENT: &str = "Student";
const EMPLOYED: &str = "Employed";
const RETIRED: &str = "Retired";

/// Draws a synthetic persona that never names the recommendation target.
///
/// Slots are drawn in catalog order, one uniform draw each, from the values
/// that neither contain nor are contained in `target_topic`. Occupation is then
/// forced to agree with the drawn age bracket, and the result is normalized for
/// `domain`.
pub fn sample_profile<R: Rng + ?Sized>(
    catalog: &SlotCatalog,
    target_topic: &str,
    domain: Domain,
    rng: &mut R,
) -> Result<ProfileRecord, CurationError> {
    let mut sampled = ProfileRecord::new();
    for (slot, values) in catalog.iter() {
        let candidates: Vec<&String> = values
            .iter()
            .filter(|value| !collides(value, target_topic))
            .collect();
        let drawn = candidates
            .choose(rng)
            .ok_or_else(|| CurationError::SamplingExhausted {
                slot: slot.to_string(),
                topic: target_topic.to_string(),
            })?;
        sampled.set(slot, vec![drawn.to_string()]);
    }

    if let Some(age_range) = sampled.joined(AGE_RANGE) {
        let occupation = occupation_for_age(&age_range, rng);
        sampled.set(OCCUPATION, vec![occupation.to_string()]);
    }

    Ok(normalize_profile(&sampled, domain))
}

/// Case-sensitive containment in either direction.
fn collides(value: &str, target_topic: &str) -> bool {
    value.contains(target_topic) || target_topic.contains(value)
}

/// Occupation consistent with an age bracket. Draws from `rng` only for the
/// brackets with two plausible occupations.
pub fn occupation_for_age<R: Rng + ?Sized>(age_range: &str, rng: &mut R) -> &'static str {
    match age_range {
        "Under 18" => STUDENT,
        "18-25" | "26-35" => pick(&[STUDENT, EMPLOYED], rng),
        "36-50" => EMPLOYED,
        _ => pick(&[EMPLOYED, RETIRED], rng),
    }
}

fn pick<R: Rng + ?Sized>(options: &[&'static str; 2], rng: &mut R) -> &'static str {
    options[rng.gen_range(0..options.len())]
}
