use std::collections::HashSet;

use crate::SearchStrategy;

/// Build a `HashSet` of the dataset, then test membership per query.
///
/// Building the set is part of the call, so it is part of what gets timed.
pub struct Hashing;

impl SearchStrategy for Hashing {
    fn count(&self, dataset: &[i64], queries: &[i64]) -> usize {
        let set: HashSet<i64> = dataset.iter().copied().collect();
        queries.iter().filter(|&q| set.contains(q)).count()
    }

    fn name(&self) -> &'static str {
        "Hashing"
    }
}

/// Scan the dataset per query, stopping at the first match.
pub struct LinearSearch;

impl SearchStrategy for LinearSearch {
    fn count(&self, dataset: &[i64], queries: &[i64]) -> usize {
        let mut found = 0;
        for &q in queries {
            for &x in dataset {
                if x == q {
                    found += 1;
                    break;
                }
            }
        }
        found
    }

    fn name(&self) -> &'static str {
        "Linear Search"
    }
}

/// Scan the whole dataset for every query, never stopping early.
///
/// Duplicates in the dataset do not inflate the count: a query is counted
/// once if it matched anywhere.
pub struct BruteForce;

impl SearchStrategy for BruteForce {
    fn count(&self, dataset: &[i64], queries: &[i64]) -> usize {
        let mut found = 0;
        for &q in queries {
            let mut hit = false;
            for &x in dataset {
                hit |= x == q;
            }
            found += hit as usize;
        }
        found
    }

    fn name(&self) -> &'static str {
        "Brute Force"
    }
}

/// All strategies, in reporting order.
pub fn strategies() -> [&'static dyn SearchStrategy; 3] {
    [&Hashing as &dyn SearchStrategy, &LinearSearch, &BruteForce]
}

/// Look up a strategy by its name, ignoring case, spaces and dashes, so
/// `linear-search` finds `Linear Search`.
pub fn strategy_by_name(name: &str) -> Option<&'static dyn SearchStrategy> {
    let norm = |s: &str| {
        s.chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase()
    };
    let name = norm(name);
    strategies().into_iter().find(|s| norm(s.name()) == name)
}
