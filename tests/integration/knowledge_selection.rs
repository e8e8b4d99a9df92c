use super::support::triple;
use anyhow::Result;
use dialogcurator::knowledge::{budget_usage, is_covered, KnowledgeSelector, TopicPath};
use dialogcurator::models::{ConversationContext, Target, Triple};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn path(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn large_pool() -> Vec<Triple> {
    let mut pool = vec![
        triple("Jet Li", "Intro", "Martial artist and actor"),
        triple("Hero", "Stars", "Jet Li"),
        triple("Hero", "Type", "Wuxia"),
        triple("Beijing", "Weather", "Sunny, 25℃"),
        triple("Noodles", "Perfect for having", "Rainy days"),
    ];
    for idx in 0..80 {
        pool.push(triple(
            &format!("Movie {idx}"),
            "Comments",
            "A long and winding story about friendship",
        ));
    }
    pool
}

#[test]
fn conversation_context_pulls_in_grounded_facts() -> Result<()> {
    let selector = KnowledgeSelector::with_budget(0);
    let target = Target::new("Movie recommendation", "Hero");
    let context = ConversationContext::new(
        "I only go out on rainy days",
        "It will be 25℃ in Beijing tomorrow",
    );
    let topics = path(&["Jet Li", "Hero"]);
    let mut rng = StdRng::seed_from_u64(11);

    let facts = selector.select(&large_pool(), &target, &topics, &context, &mut rng)?;
    let facts: HashSet<Triple> = facts.into_iter().collect();

    // A zero budget leaves no room for noise.
    let expected: HashSet<Triple> = [
        triple("Hero", "Stars", "Jet Li"),
        triple("Hero", "Type", "Wuxia"),
        triple("Beijing", "Weather", "Sunny, 25℃"),
        triple("Noodles", "Perfect for having", "Rainy days"),
    ]
    .into_iter()
    .collect();
    assert_eq!(facts, expected);
    Ok(())
}

#[test]
fn large_pools_respect_coverage_budget_and_uniqueness() -> Result<()> {
    let selector = KnowledgeSelector::with_budget(120);
    let target = Target::new("Movie recommendation", "Hero");
    let topics = path(&["NULL", "Jet Li", "Hero", "NULL"]);

    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let facts = selector.select(
            &large_pool(),
            &target,
            &topics,
            &ConversationContext::empty(),
            &mut rng,
        )?;
        assert!(is_covered(&facts, &TopicPath::new(&topics)));
        assert!(budget_usage(&facts) <= 120);
        assert!(facts.len() > 3, "noise should fill part of the budget");
        let unique: HashSet<&Triple> = facts.iter().collect();
        assert_eq!(unique.len(), facts.len());
    }
    Ok(())
}

#[test]
fn excluded_fact_returns_only_through_coverage() -> Result<()> {
    let selector = KnowledgeSelector::with_budget(0);
    let target = Target::new("Food recommendation", "Marinated Fish");
    let quirk = triple("Marinated Fish", "Specials", "Marinated Fish");
    let topics = path(&["Marinated Fish"]);
    let mut rng = StdRng::seed_from_u64(2);

    let facts = selector.select(
        &[quirk.clone()],
        &target,
        &topics,
        &ConversationContext::empty(),
        &mut rng,
    )?;
    assert_eq!(facts, vec![quirk.clone()]);

    // The exclusion ignores the subject, so neither special is picked for
    // relevance once another fact covers the target.
    let restaurant = triple("Chuan Wei Restaurant", "Specials", "Marinated Fish");
    let price = triple("Marinated Fish", "Price per person", "60");
    let facts = selector.select(
        &[quirk.clone(), restaurant.clone(), price.clone()],
        &target,
        &topics,
        &ConversationContext::empty(),
        &mut rng,
    )?;
    assert_eq!(facts, vec![price]);

    let facts = selector.select(
        &[restaurant.clone()],
        &target,
        &topics,
        &ConversationContext::empty(),
        &mut rng,
    )?;
    assert_eq!(facts, vec![restaurant]);
    Ok(())
}
