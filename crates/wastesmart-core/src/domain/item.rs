//! Food item catalog entities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One recognizable item and its disposal guidance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub alternate_names: Vec<String>,
    pub category: String,
    pub bin_color: String,
    pub disposal_note: String,
    pub requires_user_input: bool,
    pub packaging_warning: bool,
    /// Council name -> council-specific disposal guidance.
    pub location_rules: BTreeMap<String, String>,
}

impl FoodItem {
    /// Case-insensitive substring match over name, alternate names,
    /// category and disposal note. The query must already be lowercased.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
            || self
                .alternate_names
                .iter()
                .any(|name| name.to_lowercase().contains(query_lower))
            || self.category.to_lowercase().contains(query_lower)
            || self.disposal_note.to_lowercase().contains(query_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> FoodItem {
        FoodItem {
            id: "apple_001".to_string(),
            name: "Apple".to_string(),
            alternate_names: vec!["red apple".to_string(), "gala apple".to_string()],
            category: "fruit".to_string(),
            bin_color: "brown".to_string(),
            disposal_note: "Remove sticker, compost in brown bin".to_string(),
            requires_user_input: false,
            packaging_warning: true,
            location_rules: BTreeMap::new(),
        }
    }

    #[test]
    fn matches_name_case_insensitively() {
        assert!(apple().matches("apple"));
        assert!(apple().matches("app"));
    }

    #[test]
    fn matches_alternate_names_and_category() {
        assert!(apple().matches("gala"));
        assert!(apple().matches("fruit"));
    }

    #[test]
    fn matches_disposal_note() {
        assert!(apple().matches("sticker"));
    }

    #[test]
    fn rejects_unrelated_query() {
        assert!(!apple().matches("banana"));
    }
}
