use crate::models::{knowledge_token_count, Triple};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Default token budget for curated knowledge.
pub const DEFAULT_TOKEN_BUDGET: usize = 300;

/// True when the facts' tokens exceed `budget` minus one token per fact.
pub fn exceeds_budget<'a, I>(facts: I, budget: usize) -> bool
where
    I: IntoIterator<Item = &'a Triple>,
{
    let (count, tokens) = facts
        .into_iter()
        .fold((0usize, 0usize), |(count, tokens), fact| {
            (count + 1, tokens + fact.token_count())
        });
    tokens + count > budget
}

/// Picks distractor facts from the unselected part of the pool.
///
/// The unselected facts are shuffled once; growing prefixes of 1, 2, 3, ...
/// facts are drafted until one overshoots the budget or the prefix would be
/// longer than the pool. The last drafted prefix minus its final fact is
/// returned, so the result is always a prefix that already fit.
pub fn pad_with_noise<R: Rng + ?Sized>(
    pool: &[Triple],
    selected: &[Triple],
    budget: usize,
    rng: &mut R,
) -> Vec<Triple> {
    let taken: HashSet<&Triple> = selected.iter().collect();
    let mut seen: HashSet<&Triple> = HashSet::new();
    let mut noise: Vec<&Triple> = pool
        .iter()
        .filter(|fact| !taken.contains(fact) && seen.insert(*fact))
        .collect();
    noise.shuffle(rng);

    let mut drafted = 0;
    let mut size = 1;
    while size <= noise.len() {
        drafted = size;
        let candidate = selected.iter().chain(noise[..size].iter().copied());
        if exceeds_budget(candidate, budget) {
            break;
        }
        size += 1;
    }

    noise[..drafted.saturating_sub(1)]
        .iter()
        .map(|fact| (*fact).clone())
        .collect()
}

/// Tokens plus per-fact allowance of a fact set, as the budget check counts them.
pub fn budget_usage(facts: &[Triple]) -> usize {
    knowledge_token_count(facts) + facts.len()
}
