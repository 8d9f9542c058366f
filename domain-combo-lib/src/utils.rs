//! Utility functions for input parsing and domain name building.
//!
//! Turns raw comma / semicolon separated flag values into keyword sets and
//! TLD lists, and expands candidates into fully qualified domain names.

use crate::error::DomainCheckError;
use crate::types::{Candidate, KeywordSet, Separator};

/// Split a comma-separated list, trimming entries and dropping blanks.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a single comma-separated keyword list (`"one,two,three"`).
pub fn parse_keywords(input: &str) -> Result<KeywordSet, DomainCheckError> {
    KeywordSet::new(parse_list(input)).map_err(|_| {
        DomainCheckError::invalid_input(format!("no keywords found in '{}'", input.trim()))
    })
}

/// Parse semicolon-separated keyword lists (`"one,two;three,four"`).
///
/// Lists that are empty after trimming are skipped; it is an error only
/// when no list has any keyword.
pub fn parse_keyword_lists(input: &str) -> Result<Vec<KeywordSet>, DomainCheckError> {
    let sets: Vec<KeywordSet> = input
        .split(';')
        .filter_map(|list| KeywordSet::new(parse_list(list)).ok())
        .collect();

    if sets.is_empty() {
        return Err(DomainCheckError::invalid_input(format!(
            "no keyword lists found in '{}'",
            input.trim()
        )));
    }

    Ok(sets)
}

/// Resolve the keyword input of a run.
///
/// Exactly one of `keywords` (single list) and `lists` (semicolon
/// separated lists) must be given. An empty string counts as not given.
pub fn resolve_keyword_sets(
    keywords: Option<&str>,
    lists: Option<&str>,
) -> Result<Vec<KeywordSet>, DomainCheckError> {
    let keywords = keywords.filter(|k| !k.is_empty());
    let lists = lists.filter(|l| !l.is_empty());

    match (keywords, lists) {
        (Some(_), Some(_)) => Err(DomainCheckError::invalid_input(
            "cannot use both --keywords and --lists at the same time",
        )),
        (None, None) => Err(DomainCheckError::invalid_input(
            "either --keywords or --lists must be provided",
        )),
        (Some(keywords), None) => Ok(vec![parse_keywords(keywords)?]),
        (None, Some(lists)) => parse_keyword_lists(lists),
    }
}

/// Strip a single leading dot from a TLD (".com" -> "com").
pub fn normalize_tld(tld: &str) -> &str {
    let tld = tld.trim();
    tld.strip_prefix('.').unwrap_or(tld)
}

/// Build every domain name for one candidate.
///
/// Keywords are joined with `separator`, then each TLD is appended in the
/// given order. Blank TLDs are skipped.
pub fn build_domain_names(
    candidate: &Candidate,
    separator: Separator,
    tlds: &[String],
) -> Vec<String> {
    let base = candidate.join(separator);
    tlds.iter()
        .map(|tld| normalize_tld(tld))
        .filter(|tld| !tld.is_empty())
        .map(|tld| format!("{}.{}", base, tld))
        .collect()
}

/// Expand all candidates into domain names, candidate-major and TLD-minor.
pub fn expand_candidates(
    candidates: &[Candidate],
    separator: Separator,
    tlds: &[String],
) -> Vec<String> {
    candidates
        .iter()
        .flat_map(|candidate| build_domain_names(candidate, separator, tlds))
        .collect()
}
