//! Directory lookup transports.
//!
//! The checker only needs "given a name, return raw text or fail". That
//! contract is the `DirectoryLookup` trait; the system WHOIS client is the
//! default implementation.

use crate::error::DomainCheckError;
use async_trait::async_trait;

/// WHOIS protocol implementation
pub mod whois;

pub use whois::{is_whois_available, WhoisClient};

/// A source of raw registration text for a domain name.
///
/// Implementations own all transport concerns (server choice, encoding).
/// They must be shareable across worker tasks.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Look up `domain` and return the raw response text.
    async fn lookup(&self, domain: &str) -> Result<String, DomainCheckError>;
}
