//! Core data types for keyword combination and availability checking.
//!
//! This module defines the keyword inputs, generated candidates, lookup
//! results and the run configuration shared by the library and the CLI.

use crate::error::DomainCheckError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// An ordered list of non-empty, trimmed keywords.
///
/// Construction filters blank entries and rejects lists that end up empty,
/// so every `KeywordSet` in a run holds at least one keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    /// Build a set from raw keywords, trimming each and dropping blanks.
    pub fn new<I, S>(keywords: I) -> Result<Self, DomainCheckError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err(DomainCheckError::invalid_input(
                "keyword list is empty after trimming",
            ));
        }

        Ok(Self(keywords))
    }

    pub fn keywords(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A tuple of keywords selected for one domain name, before the separator
/// and TLD are applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate(Vec<String>);

impl Candidate {
    pub(crate) fn from_keywords(keywords: Vec<String>) -> Self {
        Self(keywords)
    }

    pub fn keywords(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Join the keywords with the given separator (no TLD).
    pub fn join(&self, separator: Separator) -> String {
        self.0.join(separator.as_str())
    }
}

/// Separator placed between keywords of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// Keywords are concatenated directly ("onetwo")
    #[default]
    None,
    /// Keywords are joined with a dash ("one-two")
    Dash,
}

impl Separator {
    pub fn from_dash_flag(dash: bool) -> Self {
        if dash {
            Separator::Dash
        } else {
            Separator::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::None => "",
            Separator::Dash => "-",
        }
    }
}

/// Heuristic registration verdict for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Taken,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Taken => write!(f, "taken"),
        }
    }
}

/// Outcome of checking one domain name.
///
/// Exactly one of `availability` and `error_message` is set: a failed lookup
/// carries no verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupResult {
    /// The domain name that was checked (e.g., "onetwo.com")
    pub domain: String,

    /// Classifier verdict, `None` when the lookup failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,

    /// How long the lookup took
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_duration: Option<Duration>,

    /// Failure description when the lookup itself failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LookupResult {
    /// A lookup that returned text and was classified.
    pub fn classified<D: Into<String>>(
        domain: D,
        availability: Availability,
        check_duration: Option<Duration>,
    ) -> Self {
        Self {
            domain: domain.into(),
            availability: Some(availability),
            check_duration,
            error_message: None,
        }
    }

    /// A lookup that failed; the failure replaces the verdict.
    pub fn failed<D: Into<String>>(
        domain: D,
        error: &DomainCheckError,
        check_duration: Option<Duration>,
    ) -> Self {
        Self {
            domain: domain.into(),
            availability: None,
            check_duration,
            error_message: Some(error.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.availability == Some(Availability::Available)
    }

    pub fn is_taken(&self) -> bool {
        self.availability == Some(Availability::Taken)
    }

    pub fn is_failed(&self) -> bool {
        self.error_message.is_some()
    }
}

/// Configuration for a generation + checking run.
///
/// Replaces process-wide flag values: the CLI resolves flags, environment
/// and config files into one of these and hands it to the library.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    /// Number of concurrent lookup workers
    /// Default: 10, Range: 1-100
    pub workers: usize,

    /// Keywords per candidate in single-list mode. Ignored for 2+ lists.
    /// Default: 2
    pub combinations: usize,

    /// TLDs appended to each candidate, in order
    /// Default: ["com"]
    pub tlds: Vec<String>,

    /// Separator between keywords
    /// Default: none
    pub separator: Separator,

    /// Optional bound on each individual lookup
    /// Default: None (wait for the lookup however long it takes)
    pub timeout: Option<Duration>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            combinations: 2,
            tlds: vec!["com".to_string()],
            separator: Separator::None,
            timeout: None,
        }
    }
}

impl CheckConfig {
    /// Set the worker count, clamped to 1-100.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, 100);
        self
    }

    pub fn with_combinations(mut self, combinations: usize) -> Self {
        self.combinations = combinations;
        self
    }

    pub fn with_tlds(mut self, tlds: Vec<String>) -> Self {
        self.tlds = tlds;
        self
    }

    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// How the CLI presents a finished report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = DomainCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(DomainCheckError::config(format!(
                "Unknown output format '{}', use text, json or csv",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_set_trims_and_filters() {
        let set = KeywordSet::new([" one", "", "two ", "  "]).unwrap();
        assert_eq!(set.keywords(), &["one".to_string(), "two".to_string()]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_keyword_set_rejects_empty() {
        assert!(KeywordSet::new(Vec::<String>::new()).is_err());
        assert!(KeywordSet::new([" ", ""]).is_err());
    }

    #[test]
    fn test_candidate_join() {
        let c = Candidate::from_keywords(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(c.join(Separator::None), "onetwo");
        assert_eq!(c.join(Separator::Dash), "one-two");
    }

    #[test]
    fn test_lookup_result_constructors() {
        let ok = LookupResult::classified("a.com", Availability::Available, None);
        assert!(ok.is_available());
        assert!(!ok.is_failed());

        let err = DomainCheckError::whois("b.com", "boom");
        let failed = LookupResult::failed("b.com", &err, None);
        assert!(failed.is_failed());
        assert_eq!(failed.availability, None);
        assert!(!failed.is_taken());
    }

    #[test]
    fn test_config_defaults_and_clamp() {
        let config = CheckConfig::default();
        assert_eq!(config.workers, 10);
        assert_eq!(config.combinations, 2);
        assert_eq!(config.tlds, vec!["com".to_string()]);
        assert_eq!(config.separator, Separator::None);
        assert_eq!(config.timeout, None);

        assert_eq!(CheckConfig::default().with_workers(0).workers, 1);
        assert_eq!(CheckConfig::default().with_workers(500).workers, 100);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
