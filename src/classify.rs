//! Conservation Status Classification
//!
//! Buckets the free-text `conservationStatus` strings ("Not at risk",
//! "Critically Endangered", "Vulnerable") into the fixed categories the
//! filter engine and listing badges work with.

use serde::Serialize;

use crate::catalog::BreedRecord;

/// Conservation bucket derived from the status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConservationBucket {
    Critical,
    Endangered,
    Vulnerable,
    Stable,
    Unclassified,
}

impl ConservationBucket {
    pub fn label(&self) -> &'static str {
        match self {
            ConservationBucket::Critical => "Critical",
            ConservationBucket::Endangered => "Endangered",
            ConservationBucket::Vulnerable => "Vulnerable",
            ConservationBucket::Stable => "Stable",
            ConservationBucket::Unclassified => "Unclassified",
        }
    }

    /// Lenient parse for UI/query-param input; unrecognized input is
    /// `None`, which filter code treats as "all".
    pub fn parse(value: &str) -> Option<ConservationBucket> {
        match value.to_lowercase().as_str() {
            "critical" => Some(ConservationBucket::Critical),
            "endangered" => Some(ConservationBucket::Endangered),
            "vulnerable" => Some(ConservationBucket::Vulnerable),
            "stable" => Some(ConservationBucket::Stable),
            _ => None,
        }
    }

    /// Critical, Endangered, and Vulnerable breeds are the ones the
    /// conservation programmes target.
    pub fn at_risk(&self) -> bool {
        matches!(
            self,
            ConservationBucket::Critical
                | ConservationBucket::Endangered
                | ConservationBucket::Vulnerable
        )
    }
}

/// Classify a status string by case-insensitive substring, in precedence
/// order:
/// - contains "critical" → Critical
/// - else contains "endangered" → Endangered
/// - else contains "vulnerable" → Vulnerable
/// - else contains "not at risk" or "stable" → Stable
/// - anything else (including a missing status) → Unclassified
///
/// "Critically Endangered" therefore lands in Critical, not Endangered.
pub fn classify_conservation(status: Option<&str>) -> ConservationBucket {
    let Some(status) = status else {
        return ConservationBucket::Unclassified;
    };
    let lower = status.to_lowercase();

    if lower.contains("critical") {
        ConservationBucket::Critical
    } else if lower.contains("endangered") {
        ConservationBucket::Endangered
    } else if lower.contains("vulnerable") {
        ConservationBucket::Vulnerable
    } else if lower.contains("not at risk") || lower.contains("stable") {
        ConservationBucket::Stable
    } else {
        ConservationBucket::Unclassified
    }
}

/// Bucket for a breed record's conservation status.
pub fn conservation_bucket(record: &BreedRecord) -> ConservationBucket {
    classify_conservation(record.population.conservation_status.as_deref())
}
