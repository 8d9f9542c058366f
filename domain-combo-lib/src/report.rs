//! Result aggregation and plain-text rendering.
//!
//! A `Report` splits a finished batch into available, taken and failed
//! buckets. Each bucket is sorted by domain name so the rendering does not
//! depend on lookup completion order.

use crate::types::LookupResult;
use serde::Serialize;
use std::fmt::Write;

/// A domain whose lookup failed, with the failure description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedLookup {
    pub domain: String,
    pub error: String,
}

/// Bucket sizes of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReportSummary {
    pub available: usize,
    pub taken: usize,
    pub failed: usize,
    pub total: usize,
}

/// Batch results partitioned by outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Report {
    pub available: Vec<String>,
    pub taken: Vec<String>,
    pub failed: Vec<FailedLookup>,
    pub summary: ReportSummary,
}

impl Report {
    /// Partition results into the three buckets.
    pub fn from_results(results: &[LookupResult]) -> Self {
        let mut report = Report::default();

        for result in results {
            if let Some(error) = &result.error_message {
                report.failed.push(FailedLookup {
                    domain: result.domain.clone(),
                    error: error.clone(),
                });
            } else if result.is_available() {
                report.available.push(result.domain.clone());
            } else {
                report.taken.push(result.domain.clone());
            }
        }

        report.available.sort();
        report.taken.sort();
        report.failed.sort_by(|a, b| a.domain.cmp(&b.domain));

        report.summary = ReportSummary {
            available: report.available.len(),
            taken: report.taken.len(),
            failed: report.failed.len(),
            total: results.len(),
        };

        report
    }

    pub fn summary(&self) -> ReportSummary {
        self.summary
    }

    /// Render the report as plain text.
    ///
    /// Empty buckets are left out; the summary line is always present.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if !self.available.is_empty() {
            let _ = writeln!(out, "✓ AVAILABLE ({}):", self.available.len());
            for domain in &self.available {
                let _ = writeln!(out, "  {}", domain);
            }
            out.push('\n');
        }

        if !self.taken.is_empty() {
            let _ = writeln!(out, "✗ TAKEN ({}):", self.taken.len());
            for domain in &self.taken {
                let _ = writeln!(out, "  {}", domain);
            }
            out.push('\n');
        }

        if !self.failed.is_empty() {
            let _ = writeln!(out, "⚠ ERRORS ({}):", self.failed.len());
            for failed in &self.failed {
                let _ = writeln!(out, "  {}: {}", failed.domain, failed.error);
            }
            out.push('\n');
        }

        let _ = writeln!(out, "{}", self.summary.render());
        out
    }
}

impl ReportSummary {
    /// The one-line summary, e.g. `Summary: 1 available, 2 taken, 0 errors (total: 3)`.
    pub fn render(&self) -> String {
        format!(
            "Summary: {} available, {} taken, {} errors (total: {})",
            self.available, self.taken, self.failed, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainCheckError;
    use crate::types::Availability;

    fn sample_results() -> Vec<LookupResult> {
        vec![
            LookupResult::classified("twothree.com", Availability::Taken, None),
            LookupResult::classified("onetwo.com", Availability::Available, None),
            LookupResult::failed(
                "onethree.com",
                &DomainCheckError::whois("onethree.com", "connection refused"),
                None,
            ),
            LookupResult::classified("alpha.com", Availability::Available, None),
        ]
    }

    #[test]
    fn test_partition_and_sort() {
        let report = Report::from_results(&sample_results());
        assert_eq!(report.available, vec!["alpha.com", "onetwo.com"]);
        assert_eq!(report.taken, vec!["twothree.com"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].domain, "onethree.com");
        assert!(report.failed[0].error.contains("connection refused"));
    }

    #[test]
    fn test_summary_counts() {
        let summary = Report::from_results(&sample_results()).summary();
        assert_eq!(
            summary,
            ReportSummary {
                available: 2,
                taken: 1,
                failed: 1,
                total: 4
            }
        );
    }

    #[test]
    fn test_render_sections() {
        let text = Report::from_results(&sample_results()).render();
        let expected = "\
✓ AVAILABLE (2):
  alpha.com
  onetwo.com

✗ TAKEN (1):
  twothree.com

⚠ ERRORS (1):
  onethree.com: WHOIS error for 'onethree.com': connection refused

Summary: 2 available, 1 taken, 1 errors (total: 4)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_omits_empty_sections() {
        let results = vec![LookupResult::classified("x.com", Availability::Taken, None)];
        let text = Report::from_results(&results).render();
        assert!(!text.contains("AVAILABLE"));
        assert!(!text.contains("ERRORS"));
        assert!(text.contains("✗ TAKEN (1):"));
        assert!(text.ends_with("Summary: 0 available, 1 taken, 0 errors (total: 1)\n"));
    }

    #[test]
    fn test_empty_report() {
        let report = Report::from_results(&[]);
        assert_eq!(report.summary(), ReportSummary::default());
        assert_eq!(
            report.render(),
            "Summary: 0 available, 0 taken, 0 errors (total: 0)\n"
        );
    }
}
