pub mod catalog;
pub mod normalize;
pub mod sampler;

pub use catalog::{default_catalog_path, SlotCatalog};
pub use normalize::{normalize_for_tag, normalize_profile, MAX_PREFERENCE_FRAGMENTS};
pub use sampler::{occupation_for_age, sample_profile};

use crate::error::CurationError;
use crate::models::{Domain, ProfileRecord};
use rand::Rng;
use tracing::warn;

/// Samples a persona, dropping any slot the catalog cannot fill without
/// naming the target and trying again with the remaining slots.
///
/// Fails with the last `SamplingExhausted` once no slots remain.
pub fn sample_profile_with_fallback<R: Rng + ?Sized>(
    catalog: &SlotCatalog,
    target_topic: &str,
    domain: Domain,
    rng: &mut R,
) -> Result<ProfileRecord, CurationError> {
    let mut pool = catalog.clone();
    loop {
        match sample_profile(&pool, target_topic, domain, rng) {
            Ok(profile) => return Ok(profile),
            Err(CurationError::SamplingExhausted { slot, topic }) => {
                let reduced = pool.without_slot(&slot);
                if reduced.is_empty() {
                    return Err(CurationError::SamplingExhausted { slot, topic });
                }
                warn!(slot = %slot, topic = %topic, "slot exhausted, sampling without it");
                pool = reduced;
            }
            Err(other) => return Err(other),
        }
    }
}
