use anyhow::Result;
use dialogcurator::error::CurationError;
use dialogcurator::models::profile::{
    ACCEPTED_CELEBRITIES, ACCEPTED_FOOD, ACCEPTED_MOVIES, ACCEPTED_MUSIC, ACCEPTED_POI, AGE_RANGE,
    NAME, OCCUPATION, REJECTED_MOVIES,
};
use dialogcurator::models::{Domain, ProfileRecord};
use dialogcurator::persona::sample_assistant_name;
use dialogcurator::profiles::{normalize_for_tag, sample_profile_with_fallback, SlotCatalog};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn legacy_music_key_merges_and_age_is_cleaned() -> Result<()> {
    let raw = ProfileRecord::from_pairs([
        ("Age Range", "18-25 years old"),
        ("Accepted Music", "Jay Chou"),
    ]);
    let normalized = normalize_for_tag(&raw, "music")?;
    assert_eq!(normalized.joined(AGE_RANGE).unwrap(), "18-25");
    assert_eq!(normalized.joined(ACCEPTED_MUSIC).unwrap(), "Jay Chou");
    assert!(!normalized.contains_key("Accepted Music"));
    Ok(())
}

#[test]
fn every_domain_prunes_the_other_family() -> Result<()> {
    let raw = ProfileRecord::from_pairs([
        (ACCEPTED_MOVIES, "Hero; Fearless; Red Cliff"),
        ("Accepted movie", "Ip Man"),
        (REJECTED_MOVIES, "Saw"),
        (ACCEPTED_CELEBRITIES, "Jet Li"),
        (ACCEPTED_FOOD, "Noodles"),
        (ACCEPTED_POI, "Chuan Wei Restaurant"),
        ("Reject", "Horror"),
    ]);
    for tag in ["movie", "music"] {
        let profile = normalize_for_tag(&raw, tag)?;
        assert_eq!(profile.get(ACCEPTED_MOVIES).unwrap(), ["Hero", "Fearless"]);
        assert!(!profile.contains_key(ACCEPTED_FOOD));
        assert!(!profile.contains_key(ACCEPTED_POI));
        assert!(!profile.contains_key("Reject"));
    }
    for tag in ["food", "poi"] {
        let profile = normalize_for_tag(&raw, tag)?;
        assert!(profile.contains_key(ACCEPTED_FOOD));
        assert!(profile.contains_key(ACCEPTED_POI));
        for key in [ACCEPTED_MOVIES, REJECTED_MOVIES, ACCEPTED_CELEBRITIES] {
            assert!(!profile.contains_key(key));
        }
    }
    Ok(())
}

#[test]
fn unknown_domain_tags_are_rejected() {
    let err = normalize_for_tag(&ProfileRecord::new(), "news").unwrap_err();
    assert_eq!(err, CurationError::invalid_domain("news"));
}

#[test]
fn sampled_personas_avoid_the_target_and_agree_on_occupation() -> Result<()> {
    let catalog = SlotCatalog::from_slots([
        (NAME, vec!["Li Hua", "Wang Fang"]),
        (AGE_RANGE, vec!["Under 18"]),
        (OCCUPATION, vec!["Retired"]),
        (ACCEPTED_MOVIES, vec!["Hero", "Hero 2", "Fearless"]),
    ]);
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..10 {
        let profile = sample_profile_with_fallback(&catalog, "Hero", Domain::Movie, &mut rng)?;
        assert_eq!(profile.joined(ACCEPTED_MOVIES).unwrap(), "Fearless");
        assert_eq!(profile.joined(OCCUPATION).unwrap(), "Student");

        let assistant = sample_assistant_name(&catalog, &profile.joined(NAME).unwrap(), &mut rng)?;
        assert_ne!(Some(assistant), profile.joined(NAME));
    }
    Ok(())
}
