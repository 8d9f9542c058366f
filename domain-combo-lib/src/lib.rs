//! # Domain Combo Library
//!
//! Generate candidate domain names from keyword combinations and check their
//! availability over WHOIS.
//!
//! The pipeline is: keyword sets → candidates → domain names (one per TLD) →
//! concurrent lookups → classified results → grouped report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_combo_lib::{
//!     expand_candidates, generate_candidates, parse_keywords, CheckConfig, DomainChecker, Report,
//!     Separator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let keywords = parse_keywords("one,two,three")?;
//!     let candidates = generate_candidates(&[keywords], 2);
//!     let domains = expand_candidates(&candidates, Separator::None, &["com".to_string()]);
//!
//!     let checker = DomainChecker::with_config(CheckConfig::default().with_workers(5));
//!     let results = checker.check_domains(domains).await;
//!
//!     print!("{}", Report::from_results(&results).render());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Combinations**: every size-k subset of one keyword list, in order
//! - **Cross product**: one keyword from each of several lists
//! - **Bounded concurrency**: a fixed pool of workers drains a closed queue
//! - **Failure isolation**: a failed lookup only affects its own result
//! - **Configurable**: TOML files and `DCOMBO_*` environment variables

// Re-export main public API types and functions
// This makes them available as domain_combo_lib::TypeName
pub use checker::DomainChecker;
pub use concurrent::ConcurrentProcessor;
pub use config::{
    load_env_config, parse_timeout, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    OutputConfig,
};
pub use error::DomainCheckError;
pub use protocols::{DirectoryLookup, WhoisClient};
pub use report::{FailedLookup, Report, ReportSummary};
pub use types::{
    Availability, Candidate, CheckConfig, KeywordSet, LookupResult, OutputFormat, Separator,
};
pub use utils::{
    build_domain_names, expand_candidates, normalize_tld, parse_keyword_lists, parse_keywords,
    parse_list, resolve_keyword_sets,
};

// Public modules
pub mod classify;
pub mod generate;
pub mod protocols;
pub mod report;

// Re-export generation functions for convenience
pub use generate::{combinations, cross_product, estimate_candidate_count, generate_candidates};

// Internal modules - these are not part of the public API
mod checker;
mod concurrent;
mod config;
mod error;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainCheckError>;
