//! Candidate generation engine.
//!
//! Produces keyword tuples from the parsed keyword sets. Separator and TLD
//! expansion happen afterwards in `utils::expand_candidates`.
//!
//! # Modes
//!
//! - One set: every `size`-element combination, keeping the original
//!   keyword order inside each tuple (no permutations, no repeats).
//! - Two or more sets: the full cross product, one keyword from each set,
//!   in set order. `size` is ignored.
//!
//! Both modes yield candidates in lexicographic order over source indices.
//!
//! # Examples
//!
//! ```
//! use domain_combo_lib::generate::generate_candidates;
//! use domain_combo_lib::KeywordSet;
//!
//! let sets = vec![KeywordSet::new(["one", "two", "three"]).unwrap()];
//! let candidates = generate_candidates(&sets, 2);
//! assert_eq!(candidates.len(), 3); // C(3, 2)
//! assert_eq!(candidates[0].keywords(), &["one", "two"]);
//! ```

use crate::types::{Candidate, KeywordSet};

/// All `size`-element combinations of `keywords`, index-increasing.
///
/// Returns an empty list when `size` is 0 or larger than the keyword count.
pub fn combinations(keywords: &[String], size: usize) -> Vec<Candidate> {
    let total = keywords.len();
    if size == 0 || size > total {
        return Vec::new();
    }

    let mut results = Vec::with_capacity(binomial(total, size).min(1_000_000));
    let mut indices: Vec<usize> = (0..size).collect();

    loop {
        results.push(Candidate::from_keywords(
            indices.iter().map(|&i| keywords[i].clone()).collect(),
        ));

        // Rightmost position that has not reached its ceiling. Position i can
        // go up to i + (total - size).
        let mut pos = size;
        loop {
            if pos == 0 {
                return results;
            }
            pos -= 1;
            if indices[pos] != pos + total - size {
                break;
            }
        }

        indices[pos] += 1;
        for next in pos + 1..size {
            indices[next] = indices[next - 1] + 1;
        }
    }
}

/// Cross product of the sets: one keyword from each set, in set order.
///
/// Uses an odometer over set indices with the last set turning fastest,
/// so `[[a, b], [c, d]]` yields `ac, ad, bc, bd`.
pub fn cross_product(sets: &[KeywordSet]) -> Vec<Candidate> {
    if sets.is_empty() || sets.iter().any(|s| s.is_empty()) {
        return Vec::new();
    }

    let total = sets.iter().map(|s| s.len()).product::<usize>();
    let mut results = Vec::with_capacity(total.min(1_000_000));
    let mut counters = vec![0usize; sets.len()];

    for _ in 0..total {
        results.push(Candidate::from_keywords(
            counters
                .iter()
                .enumerate()
                .map(|(i, &c)| sets[i].keywords()[c].clone())
                .collect(),
        ));

        // Increment odometer (rightmost first)
        for i in (0..counters.len()).rev() {
            counters[i] += 1;
            if counters[i] < sets[i].len() {
                break;
            }
            counters[i] = 0;
        }
    }

    results
}

/// Generate candidates for a run.
///
/// A single set selects combination mode with `size` keywords per
/// candidate; multiple sets select cross-product mode.
pub fn generate_candidates(sets: &[KeywordSet], size: usize) -> Vec<Candidate> {
    match sets {
        [] => Vec::new(),
        [single] => combinations(single.keywords(), size),
        _ => cross_product(sets),
    }
}

/// Number of candidates `generate_candidates` would produce.
///
/// Saturates instead of overflowing for very large inputs.
pub fn estimate_candidate_count(sets: &[KeywordSet], size: usize) -> usize {
    match sets {
        [] => 0,
        [single] => {
            if size == 0 || size > single.len() {
                0
            } else {
                binomial(single.len(), size)
            }
        }
        _ => sets
            .iter()
            .fold(1usize, |acc, s| acc.saturating_mul(s.len())),
    }
}

/// C(n, k) with saturating arithmetic.
fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
        if result > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    result as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn set(list: &[&str]) -> KeywordSet {
        KeywordSet::new(list).unwrap()
    }

    fn joined(candidates: &[Candidate]) -> Vec<String> {
        candidates.iter().map(|c| c.keywords().join("")).collect()
    }

    // ── Combinations ────────────────────────────────────────────────

    #[test]
    fn test_pairs_of_three() {
        let result = combinations(&words(&["one", "two", "three"]), 2);
        assert_eq!(joined(&result), vec!["onetwo", "onethree", "twothree"]);
    }

    #[test]
    fn test_combination_counts_match_binomial() {
        let keywords = words(&["a", "b", "c", "d", "e", "f"]);
        for size in 1..=keywords.len() {
            let result = combinations(&keywords, size);
            assert_eq!(result.len(), binomial(keywords.len(), size), "size {}", size);
            assert!(result.iter().all(|c| c.len() == size));
        }
    }

    #[test]
    fn test_combinations_are_index_increasing_and_unique() {
        let keywords = words(&["get", "my", "app", "now", "fast"]);
        let result = combinations(&keywords, 3);

        let mut seen = HashSet::new();
        for candidate in &result {
            let positions: Vec<usize> = candidate
                .keywords()
                .iter()
                .map(|k| keywords.iter().position(|w| w == k).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));

            let mut as_set: Vec<&String> = candidate.keywords().iter().collect();
            as_set.sort();
            assert!(seen.insert(as_set), "duplicate candidate {:?}", candidate);
        }
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn test_combinations_lexicographic_order() {
        let result = combinations(&words(&["a", "b", "c", "d"]), 2);
        assert_eq!(joined(&result), vec!["ab", "ac", "ad", "bc", "bd", "cd"]);
    }

    #[test]
    fn test_size_out_of_range_is_empty() {
        let keywords = words(&["one", "two", "three"]);
        assert!(combinations(&keywords, 0).is_empty());
        assert!(combinations(&keywords, 4).is_empty());
        assert!(combinations(&[], 1).is_empty());
    }

    #[test]
    fn test_full_size_is_single_candidate() {
        let result = combinations(&words(&["x", "y", "z"]), 3);
        assert_eq!(joined(&result), vec!["xyz"]);
    }

    #[test]
    fn test_size_one_keeps_order() {
        let result = combinations(&words(&["b", "a", "c"]), 1);
        assert_eq!(joined(&result), vec!["b", "a", "c"]);
    }

    // ── Cross product ───────────────────────────────────────────────

    #[test]
    fn test_cross_product_two_sets() {
        let result = cross_product(&[set(&["a", "b"]), set(&["c", "d"])]);
        assert_eq!(joined(&result), vec!["ac", "ad", "bc", "bd"]);
    }

    #[test]
    fn test_cross_product_three_sets_count_and_order() {
        let sets = [set(&["a", "b"]), set(&["c", "d", "e"]), set(&["f", "g"])];
        let result = cross_product(&sets);
        assert_eq!(result.len(), 12);
        assert_eq!(result[0].keywords(), &words(&["a", "c", "f"])[..]);
        assert_eq!(result[1].keywords(), &words(&["a", "c", "g"])[..]);
        assert_eq!(result[11].keywords(), &words(&["b", "e", "g"])[..]);

        for candidate in &result {
            assert_eq!(candidate.len(), 3);
            for (i, keyword) in candidate.keywords().iter().enumerate() {
                assert!(sets[i].keywords().contains(keyword));
            }
        }
    }

    #[test]
    fn test_cross_product_single_set() {
        let result = cross_product(&[set(&["a", "b"])]);
        assert_eq!(joined(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_cross_product_empty() {
        assert!(cross_product(&[]).is_empty());
    }

    // ── Mode selection ──────────────────────────────────────────────

    #[test]
    fn test_generate_single_set_uses_combinations() {
        let result = generate_candidates(&[set(&["one", "two", "three"])], 2);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_generate_multi_set_ignores_size() {
        let sets = [set(&["a", "b"]), set(&["c", "d"])];
        assert_eq!(generate_candidates(&sets, 7).len(), 4);
        assert_eq!(generate_candidates(&sets, 0).len(), 4);
    }

    #[test]
    fn test_generate_no_sets() {
        assert!(generate_candidates(&[], 2).is_empty());
    }

    // ── Estimates ───────────────────────────────────────────────────

    #[test]
    fn test_estimate_matches_generation() {
        let single = [set(&["a", "b", "c", "d", "e"])];
        assert_eq!(estimate_candidate_count(&single, 2), 10);
        assert_eq!(estimate_candidate_count(&single, 6), 0);
        assert_eq!(estimate_candidate_count(&single, 0), 0);

        let multi = [set(&["a", "b"]), set(&["c", "d", "e"])];
        assert_eq!(estimate_candidate_count(&multi, 2), 6);
    }

    #[test]
    fn test_binomial_saturates() {
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(2, 3), 0);
        assert_eq!(binomial(10_000, 5_000), usize::MAX);
    }
}
