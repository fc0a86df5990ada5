//! Council entities and UK postcode handling.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Full UK postcode, e.g. "SW1A 1AA" (space optional).
static POSTCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}$").unwrap());

/// Outward part of a postcode, e.g. "SW1A" in "SW1A1AA".
static OUTWARD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{1,2}[0-9][A-Z0-9]?").unwrap());

/// Weekly collection days, one per waste stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSchedule {
    pub compost: String,
    pub recycling: String,
    pub general: String,
}

/// Disposal destination per item class, in council-specific terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisposalRules {
    pub disposable_cups: String,
    pub pizza_boxes: String,
    pub plastic_bottles: String,
    pub food_waste: String,
}

/// A local authority and its waste-handling rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Council {
    pub id: String,
    pub name: String,
    pub postcode_prefixes: Vec<String>,
    pub rules: DisposalRules,
    pub collection_schedule: CollectionSchedule,
    pub special_instructions: Vec<String>,
}

impl Council {
    /// Whether this council serves the given normalized postcode.
    pub fn serves(&self, normalized_postcode: &str) -> bool {
        self.postcode_prefixes
            .iter()
            .any(|prefix| normalized_postcode.starts_with(prefix.as_str()))
    }

    pub fn summary(&self) -> CouncilSummary {
        CouncilSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            postcode_prefixes: self.postcode_prefixes.clone(),
            collection_schedule: self.collection_schedule.clone(),
        }
    }
}

/// Listing projection of a council, without rules and instructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilSummary {
    pub id: String,
    pub name: String,
    pub postcode_prefixes: Vec<String>,
    pub collection_schedule: CollectionSchedule,
}

/// Upcoming collection dates for each waste stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextCollection {
    pub compost: DateTime<Utc>,
    pub recycling: DateTime<Utc>,
    pub general: DateTime<Utc>,
}

/// A postcode lookup result: the matched council plus the queried
/// postcode and its upcoming collection dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilMatch {
    #[serde(flatten)]
    pub council: Council,
    pub postcode: String,
    pub next_collection: NextCollection,
}

/// Uppercase and strip all whitespace, e.g. "sw1a 1aa" -> "SW1A1AA".
pub fn normalize_postcode(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Validate the full postcode format against the normalized input.
pub fn validate_postcode(raw: &str) -> Result<String, DomainError> {
    let normalized = normalize_postcode(raw);
    if POSTCODE_RE.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(DomainError::validation(
            "Please provide a valid UK postcode format (e.g., SW1A 1AA)",
        ))
    }
}

/// Extract the outward prefix from a normalized postcode.
pub fn outward_prefix(normalized: &str) -> Option<&str> {
    OUTWARD_RE.find(normalized).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_postcode("sw1a 1aa"), "SW1A1AA");
        assert_eq!(normalize_postcode(" E1  6AN "), "E16AN");
    }

    #[test]
    fn accepts_valid_postcodes() {
        for postcode in ["SW1A 1AA", "E1 6AN", "e14 9ge", "M1 1AE"] {
            assert!(validate_postcode(postcode).is_ok(), "{postcode}");
        }
    }

    #[test]
    fn rejects_malformed_postcodes() {
        for postcode in ["", "NOT A POSTCODE", "12345", "SW1A"] {
            assert!(validate_postcode(postcode).is_err(), "{postcode}");
        }
    }

    #[test]
    fn extracts_outward_prefix() {
        assert_eq!(outward_prefix("SW1A1AA"), Some("SW1A"));
        assert_eq!(outward_prefix("E16AN"), Some("E16"));
        assert_eq!(outward_prefix("146AN"), None);
    }
}
