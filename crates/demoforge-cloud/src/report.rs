//! Outcome types for provisioning and teardown runs
//!
//! Partial failure is a first-class return value here: every attempted
//! operation ends up as an explicit outcome in a report instead of a
//! caught-and-printed exception.

use crate::provider::DeployedService;
use serde::{Deserialize, Serialize};

/// Cap on the verification body excerpt, in characters
pub const EXCERPT_CHAR_LIMIT: usize = 2000;

/// Kind of cloud resource an outcome refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Bucket,
    Service,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Bucket => write!(f, "bucket"),
            ResourceKind::Service => write!(f, "service"),
        }
    }
}

/// Outcome of one attempted resource deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceOutcome {
    pub kind: ResourceKind,

    pub name: String,

    pub success: bool,

    /// Cause, when the attempt failed
    pub error: Option<String>,
}

/// Result of a teardown run, one entry per attempted resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeardownReport {
    pub outcomes: Vec<ResourceOutcome>,

    /// True when no ledger was found and no cloud call was made
    pub nothing_to_do: bool,
}

impl TeardownReport {
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            nothing_to_do: false,
        }
    }

    pub fn nothing_to_do() -> Self {
        Self {
            outcomes: Vec::new(),
            nothing_to_do: true,
        }
    }

    pub fn record_success(&mut self, kind: ResourceKind, name: impl Into<String>) {
        self.outcomes.push(ResourceOutcome {
            kind,
            name: name.into(),
            success: true,
            error: None,
        });
    }

    pub fn record_failure(
        &mut self,
        kind: ResourceKind,
        name: impl Into<String>,
        error: impl Into<String>,
    ) {
        self.outcomes.push(ResourceOutcome {
            kind,
            name: name.into(),
            success: false,
            error: Some(error.into()),
        });
    }

    /// True when every attempted deletion succeeded
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }
}

impl Default for TeardownReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a provisioning run
///
/// A deploy failure is reported here, not raised: the bucket was already
/// created and recorded, and the run as a whole still counts as done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionReport {
    /// Name of the bucket created by this run
    pub bucket: String,

    /// The deployed service, when the deploy reached a resolvable URL
    pub service: Option<DeployedService>,

    /// Cause of the deploy failure, when there was one
    pub deploy_error: Option<String>,

    /// Outcome of the single post-deploy probe
    pub verification: Option<VerificationReport>,
}

impl ProvisionReport {
    pub fn deployed(&self) -> bool {
        self.service.is_some()
    }
}

/// Diagnostic record of the single best-effort call to the deployed service
///
/// Never treated as a failure of the provisioning run, whatever it holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub url: String,

    /// HTTP status, when a response came back
    pub status: Option<u16>,

    /// Response body, capped at [`EXCERPT_CHAR_LIMIT`] characters
    pub excerpt: Option<String>,

    /// Timeout, connection error, or unreadable body
    pub error: Option<String>,
}

impl VerificationReport {
    /// A response was received; the body excerpt is truncated to the cap
    pub fn received(url: impl Into<String>, status: u16, body: &str) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            excerpt: Some(truncate_excerpt(body)),
            error: None,
        }
    }

    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
            excerpt: None,
            error: Some(error.into()),
        }
    }
}

fn truncate_excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_CHAR_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_is_capped() {
        let body = "x".repeat(EXCERPT_CHAR_LIMIT + 500);
        let report = VerificationReport::received("https://svc.run.app", 200, &body);
        assert_eq!(report.excerpt.unwrap().chars().count(), EXCERPT_CHAR_LIMIT);
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        // Multi-byte characters must not be split mid-codepoint.
        let body = "é".repeat(EXCERPT_CHAR_LIMIT + 10);
        let report = VerificationReport::received("https://svc.run.app", 200, &body);
        assert_eq!(report.excerpt.unwrap().chars().count(), EXCERPT_CHAR_LIMIT);
    }

    #[test]
    fn test_teardown_report_cleanliness() {
        let mut report = TeardownReport::new();
        report.record_success(ResourceKind::Bucket, "automation-bucket-ab12cd34");
        assert!(report.is_clean());

        report.record_failure(ResourceKind::Service, "svc1", "permission denied");
        assert!(!report.is_clean());
        assert_eq!(report.outcomes.len(), 2);
    }
}
