use crate::error::CurationError;
use crate::models::profile::{
    canonical_slot_key, clean_age_range, split_slot_value, ACCEPTED_CELEBRITIES, ACCEPTED_FOOD,
    ACCEPTED_MOVIES, ACCEPTED_MUSIC, ACCEPTED_NEWS, ACCEPTED_POI, AGE_RANGE, FAVORITE_NEWS, REJECT,
    REJECTED_MOVIES, REJECTED_MUSIC, SLOT_DELIMITER,
};
use crate::models::{Domain, ProfileRecord};

/// Accepted/Rejected slots keep at most this many fragments.
pub const MAX_PREFERENCE_FRAGMENTS: usize = 2;

/// Legacy slots dropped from every profile.
const RETIRED_SLOTS: [&str; 3] = [ACCEPTED_NEWS, FAVORITE_NEWS, REJECT];

/// Slots that only make sense for movie and music conversations.
const MEDIA_SLOTS: [&str; 5] = [
    ACCEPTED_MOVIES,
    ACCEPTED_MUSIC,
    ACCEPTED_CELEBRITIES,
    REJECTED_MOVIES,
    REJECTED_MUSIC,
];

/// Slots that only make sense for food and POI conversations.
const VENUE_SLOTS: [&str; 2] = [ACCEPTED_FOOD, ACCEPTED_POI];

/// Same as [`normalize_profile`] but takes the domain as its lowercase tag.
pub fn normalize_for_tag(
    raw: &ProfileRecord,
    domain: &str,
) -> Result<ProfileRecord, CurationError> {
    let domain: Domain = domain.parse()?;
    Ok(normalize_profile(raw, domain))
}

/// Canonicalizes a raw persona for one domain.
///
/// Raw fragments merge into their canonical key in encounter order, preference
/// slots are cut to [`MAX_PREFERENCE_FRAGMENTS`], and slots irrelevant to the
/// domain are dropped. Deterministic for a given input.
pub fn normalize_profile(raw: &ProfileRecord, domain: Domain) -> ProfileRecord {
    let mut normalized = ProfileRecord::new();
    for (key, values) in raw.iter() {
        if key == AGE_RANGE {
            let cleaned = clean_age_range(&values.join(SLOT_DELIMITER));
            normalized.set(AGE_RANGE, split_slot_value(&cleaned));
        } else {
            normalized.append(canonical_slot_key(key), values.iter().cloned());
        }
    }

    for (key, values) in normalized.iter_mut() {
        if is_preference_slot(key) {
            values.truncate(MAX_PREFERENCE_FRAGMENTS);
        }
    }

    for key in RETIRED_SLOTS {
        normalized.remove(key);
    }
    let irrelevant: &[&str] = if domain.is_media() {
        &VENUE_SLOTS
    } else {
        &MEDIA_SLOTS
    };
    for key in irrelevant {
        normalized.remove(key);
    }
    normalized
}

fn is_preference_slot(key: &str) -> bool {
    key.contains("Accepted") || key.contains("Rejected")
}
