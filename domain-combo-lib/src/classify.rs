//! WHOIS response classification.
//!
//! Responses are unstructured text that varies between registries, so the
//! verdict is a substring heuristic, not a registration guarantee. Available
//! indicators are checked first, then taken indicators. Anything else is
//! treated as taken.

use crate::types::Availability;

/// Phrases that indicate no registration exists.
pub const AVAILABLE_INDICATORS: &[&str] = &[
    "no match",
    "not found",
    "no entries found",
    "no data found",
    "available for registration",
    "status: free",
];

/// Phrases that only appear in records of registered domains.
pub const TAKEN_INDICATORS: &[&str] = &[
    "domain name:",
    "registrar:",
    "creation date:",
    "expiration date:",
    "updated date:",
];

/// Which rule produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// An available indicator matched
    Available(&'static str),
    /// A taken indicator matched
    Taken(&'static str),
    /// Nothing matched; the response defaulted to taken
    Fallback,
}

/// A verdict together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub availability: Availability,
    pub indicator: Indicator,
}

/// Classify raw WHOIS text.
pub fn classify(raw: &str) -> Availability {
    classify_with_indicator(raw).availability
}

/// Classify raw WHOIS text and report which indicator matched.
pub fn classify_with_indicator(raw: &str) -> Classification {
    let text = raw.to_lowercase();

    if let Some(pattern) = AVAILABLE_INDICATORS.iter().find(|p| text.contains(*p)) {
        return Classification {
            availability: Availability::Available,
            indicator: Indicator::Available(*pattern),
        };
    }

    if let Some(pattern) = TAKEN_INDICATORS.iter().find(|p| text.contains(*p)) {
        return Classification {
            availability: Availability::Taken,
            indicator: Indicator::Taken(*pattern),
        };
    }

    Classification {
        availability: Availability::Taken,
        indicator: Indicator::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_patterns() {
        assert_eq!(
            classify("No match for \"ONETWO.COM\"."),
            Availability::Available
        );
        assert_eq!(classify("Domain not found."), Availability::Available);
        assert_eq!(classify("NO ENTRIES FOUND for query"), Availability::Available);
        assert_eq!(classify("Status: FREE"), Availability::Available);
        assert_eq!(
            classify("This name is available for registration"),
            Availability::Available
        );
    }

    #[test]
    fn test_taken_patterns() {
        let record = "Domain Name: GOOGLE.COM\nRegistrar: MarkMonitor Inc.\nCreation Date: 1997-09-15";
        assert_eq!(classify(record), Availability::Taken);
        assert_eq!(classify("registrar: someone"), Availability::Taken);
        assert_eq!(classify("Updated Date: 2024-01-01"), Availability::Taken);
    }

    #[test]
    fn test_available_checked_before_taken() {
        let mixed = "Domain Name: example.xyz\n>>> no match for this object";
        let c = classify_with_indicator(mixed);
        assert_eq!(c.availability, Availability::Available);
        assert_eq!(c.indicator, Indicator::Available("no match"));
    }

    #[test]
    fn test_unrecognized_falls_back_to_taken() {
        let c = classify_with_indicator("% Query rate exceeded, see terms of use");
        assert_eq!(c.availability, Availability::Taken);
        assert_eq!(c.indicator, Indicator::Fallback);

        assert_eq!(classify(""), Availability::Taken);
    }

    #[test]
    fn test_indicator_reported_for_taken() {
        let c = classify_with_indicator("Registrar: Example Registrar, LLC");
        assert_eq!(c.indicator, Indicator::Taken("registrar:"));
    }
}
