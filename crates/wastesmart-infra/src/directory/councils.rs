//! Council directory with postcode lookup.

use chrono::{Duration, Utc};

use wastesmart_core::DomainError;
use wastesmart_core::domain::{
    CollectionSchedule, Council, CouncilMatch, CouncilSummary, DisposalRules, NextCollection,
    outward_prefix, validate_postcode,
};

/// In-memory directory of councils keyed by postcode prefix.
pub struct CouncilDirectory {
    councils: Vec<Council>,
}

impl CouncilDirectory {
    pub fn new() -> Self {
        Self {
            councils: vec![
                Council {
                    id: "westminster".to_string(),
                    name: "Westminster City Council".to_string(),
                    postcode_prefixes: ["SW1A", "SW1P", "SW1E", "SW1H", "SW1V", "SW1W", "SW1X", "SW1Y"]
                        .map(String::from)
                        .to_vec(),
                    rules: DisposalRules {
                        disposable_cups: "general_waste".to_string(),
                        pizza_boxes: "split_disposal".to_string(),
                        plastic_bottles: "clean_recycling".to_string(),
                        food_waste: "brown_bin".to_string(),
                    },
                    collection_schedule: CollectionSchedule {
                        compost: "Wednesday".to_string(),
                        recycling: "Monday".to_string(),
                        general: "Tuesday".to_string(),
                    },
                    special_instructions: vec![
                        "Disposable cups go to general waste".to_string(),
                        "Pizza boxes: clean parts to recycling, greasy parts to general waste"
                            .to_string(),
                        "Plastic bottles must be clean and caps removed".to_string(),
                    ],
                },
                Council {
                    id: "tower_hamlets".to_string(),
                    name: "Tower Hamlets Council".to_string(),
                    postcode_prefixes: ["E1", "E2", "E3", "E14"].map(String::from).to_vec(),
                    rules: DisposalRules {
                        disposable_cups: "recycling".to_string(),
                        pizza_boxes: "split_disposal".to_string(),
                        plastic_bottles: "mixed_recycling".to_string(),
                        food_waste: "green_caddy".to_string(),
                    },
                    collection_schedule: CollectionSchedule {
                        compost: "Thursday".to_string(),
                        recycling: "Friday".to_string(),
                        general: "Monday".to_string(),
                    },
                    special_instructions: vec![
                        "Disposable cups can be recycled".to_string(),
                        "Pizza boxes: tear off clean parts for recycling".to_string(),
                        "Mixed recycling bin for all clean containers".to_string(),
                    ],
                },
            ],
        }
    }

    /// Listing projection of every council.
    pub fn all(&self) -> Vec<CouncilSummary> {
        self.councils.iter().map(Council::summary).collect()
    }

    /// Match a postcode to its council, attaching upcoming collection
    /// dates. Malformed postcodes fail validation; well-formed postcodes
    /// outside every council's prefixes are not found.
    pub fn lookup(&self, postcode: &str) -> Result<CouncilMatch, DomainError> {
        let normalized = validate_postcode(postcode)?;
        outward_prefix(&normalized)
            .ok_or_else(|| DomainError::validation("Please provide a valid UK postcode format (e.g., SW1A 1AA)"))?;

        let council = self
            .councils
            .iter()
            .find(|council| council.serves(&normalized))
            .ok_or_else(|| DomainError::not_found("Council", postcode))?;

        // Mock upcoming collections, offset from today.
        let today = Utc::now();
        let next_collection = NextCollection {
            compost: today + Duration::days(3),
            recycling: today + Duration::days(5),
            general: today + Duration::days(2),
        };

        Ok(CouncilMatch {
            council: council.clone(),
            postcode: postcode.to_string(),
            next_collection,
        })
    }
}

impl Default for CouncilDirectory {
    fn default() -> Self {
        Self::new()
    }
}
