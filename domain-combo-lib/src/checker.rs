//! Main domain checker implementation.
//!
//! `DomainChecker` ties the lookup transport, the response classifier and
//! the worker pool together. It never returns an error for a lookup: every
//! failure is recorded in that domain's `LookupResult`.

use crate::classify::{classify_with_indicator, Indicator};
use crate::concurrent::ConcurrentProcessor;
use crate::error::DomainCheckError;
use crate::protocols::{DirectoryLookup, WhoisClient};
use crate::types::{CheckConfig, LookupResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Coordinates availability checks for generated domain names.
///
/// # Example
///
/// ```rust,no_run
/// use domain_combo_lib::{CheckConfig, DomainChecker};
///
/// #[tokio::main]
/// async fn main() {
///     let checker = DomainChecker::with_config(CheckConfig::default().with_workers(5));
///     let results = checker
///         .check_domains(vec!["onetwo.com".to_string(), "twothree.com".to_string()])
///         .await;
///     for result in results {
///         println!("{}: {:?}", result.domain, result.availability);
///     }
/// }
/// ```
pub struct DomainChecker<L = WhoisClient> {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Transport shared by all workers
    lookup: Arc<L>,
}

impl DomainChecker<WhoisClient> {
    /// Create a checker with default configuration and the system whois client.
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with custom configuration and the system whois client.
    pub fn with_config(config: CheckConfig) -> Self {
        Self::with_lookup(config, WhoisClient::new())
    }
}

impl Default for DomainChecker<WhoisClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: DirectoryLookup + 'static> DomainChecker<L> {
    /// Create a checker around any lookup transport.
    pub fn with_lookup(config: CheckConfig, lookup: L) -> Self {
        Self {
            config,
            lookup: Arc::new(lookup),
        }
    }

    /// Check a single domain.
    pub async fn check_domain(&self, domain: &str) -> LookupResult {
        lookup_and_classify(self.lookup.as_ref(), domain.to_string(), self.config.timeout).await
    }

    /// Check many domains on the worker pool.
    ///
    /// Blocks until every domain has a result. The returned vector has one
    /// entry per input name, in completion order.
    pub async fn check_domains(&self, domains: Vec<String>) -> Vec<LookupResult> {
        let total = domains.len();
        let processor = ConcurrentProcessor::new(self.config.workers);
        let lookup = Arc::clone(&self.lookup);
        let timeout = self.config.timeout;

        tracing::info!(
            domains = total,
            workers = processor.workers(),
            "checking domains"
        );
        let start = Instant::now();

        let results = processor
            .run(domains, move |domain| {
                let lookup = Arc::clone(&lookup);
                async move { lookup_and_classify(lookup.as_ref(), domain, timeout).await }
            })
            .await;

        tracing::info!(
            domains = total,
            failed = results.iter().filter(|r| r.is_failed()).count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "all lookups finished"
        );

        results
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

/// Perform one lookup and turn its outcome into a `LookupResult`.
async fn lookup_and_classify<L: DirectoryLookup + ?Sized>(
    lookup: &L,
    domain: String,
    timeout: Option<Duration>,
) -> LookupResult {
    let start = Instant::now();

    let response = match timeout {
        Some(limit) => match tokio::time::timeout(limit, lookup.lookup(&domain)).await {
            Ok(response) => response,
            Err(_) => Err(DomainCheckError::timeout("WHOIS query", limit)),
        },
        None => lookup.lookup(&domain).await,
    };

    let elapsed = start.elapsed();

    match response {
        Ok(raw) => {
            let classification = classify_with_indicator(&raw);
            match classification.indicator {
                Indicator::Fallback => tracing::debug!(
                    domain = %domain,
                    status = %classification.availability,
                    "no indicator matched, assuming taken"
                ),
                Indicator::Available(pattern) | Indicator::Taken(pattern) => tracing::debug!(
                    domain = %domain,
                    status = %classification.availability,
                    indicator = pattern,
                    duration_ms = elapsed.as_millis() as u64,
                    "domain classified"
                ),
            }
            LookupResult::classified(domain, classification.availability, Some(elapsed))
        }
        Err(e) => {
            tracing::debug!(domain = %domain, error = %e, "lookup failed");
            LookupResult::failed(domain, &e, Some(elapsed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Availability;
    use async_trait::async_trait;

    /// Answers from the domain name itself.
    struct ScriptedLookup;

    #[async_trait]
    impl DirectoryLookup for ScriptedLookup {
        async fn lookup(&self, domain: &str) -> Result<String, DomainCheckError> {
            if domain.starts_with("free") {
                Ok("No match for domain".to_string())
            } else if domain.starts_with("broken") {
                Err(DomainCheckError::whois(domain, "connection reset"))
            } else if domain.starts_with("slow") {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok("Registrar: Slow Registrar".to_string())
            } else if domain.starts_with("odd") {
                Ok("% unrecognised banner".to_string())
            } else {
                Ok("Domain Name: X\nRegistrar: Example".to_string())
            }
        }
    }

    fn checker() -> DomainChecker<ScriptedLookup> {
        DomainChecker::with_lookup(CheckConfig::default(), ScriptedLookup)
    }

    #[test]
    fn test_check_domain_available() {
        let result = tokio_test::block_on(checker().check_domain("freeone.com"));
        assert_eq!(result.domain, "freeone.com");
        assert_eq!(result.availability, Some(Availability::Available));
        assert!(result.error_message.is_none());
        assert!(result.check_duration.is_some());
    }

    #[test]
    fn test_check_domain_taken_and_fallback() {
        let taken = tokio_test::block_on(checker().check_domain("google.com"));
        assert_eq!(taken.availability, Some(Availability::Taken));

        let odd = tokio_test::block_on(checker().check_domain("oddname.com"));
        assert_eq!(odd.availability, Some(Availability::Taken));
    }

    #[test]
    fn test_check_domain_failure_is_captured() {
        let result = tokio_test::block_on(checker().check_domain("brokenname.com"));
        assert!(result.is_failed());
        assert_eq!(result.availability, None);
        assert!(result
            .error_message
            .as_deref()
            .unwrap_or_default()
            .contains("connection reset"));
    }

    #[tokio::test]
    async fn test_timeout_becomes_failure() {
        let config = CheckConfig::default().with_timeout(Some(Duration::from_secs(1)));
        let checker = DomainChecker::with_lookup(config, ScriptedLookup);

        let result = checker.check_domain("slowname.com").await;
        assert!(result.is_failed());
        assert!(result.error_message.unwrap().contains("Timeout"));
    }

    #[tokio::test]
    async fn test_check_domains_isolates_failures() {
        let checker = DomainChecker::with_lookup(
            CheckConfig::default().with_workers(2),
            ScriptedLookup,
        );
        let names: Vec<String> = ["freea.com", "brokenb.com", "takenc.com", "freed.net"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut results = checker.check_domains(names).await;
        results.sort_by(|a, b| a.domain.cmp(&b.domain));

        assert_eq!(results.len(), 4);
        assert!(results[0].is_failed()); // brokenb.com
        assert!(results[1].is_available()); // freea.com
        assert!(results[2].is_available()); // freed.net
        assert!(results[3].is_taken()); // takenc.com
    }
}
