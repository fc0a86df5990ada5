//! Food item catalog with search and filter queries.

use std::collections::BTreeMap;

use wastesmart_core::domain::FoodItem;

/// In-memory catalog of recognizable items.
pub struct ItemCatalog {
    items: Vec<FoodItem>,
}

fn item(
    id: &str,
    name: &str,
    alternate_names: &[&str],
    category: &str,
    bin_color: &str,
    disposal_note: &str,
    requires_user_input: bool,
    packaging_warning: bool,
    westminster_rule: &str,
    tower_hamlets_rule: &str,
) -> FoodItem {
    FoodItem {
        id: id.to_string(),
        name: name.to_string(),
        alternate_names: alternate_names.iter().map(|s| s.to_string()).collect(),
        category: category.to_string(),
        bin_color: bin_color.to_string(),
        disposal_note: disposal_note.to_string(),
        requires_user_input,
        packaging_warning,
        location_rules: BTreeMap::from([
            ("Westminster".to_string(), westminster_rule.to_string()),
            ("Tower Hamlets".to_string(), tower_hamlets_rule.to_string()),
        ]),
    }
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: vec![
                item(
                    "apple_001",
                    "Apple",
                    &["red apple", "green apple", "gala apple", "fuji apple"],
                    "fruit",
                    "brown",
                    "Remove sticker, compost in brown bin",
                    false,
                    true,
                    "Food waste bin (brown) - collected weekly on Wednesdays",
                    "Green caddy for food waste - collected twice weekly",
                ),
                item(
                    "banana_001",
                    "Banana",
                    &["yellow banana", "ripe banana", "green banana"],
                    "fruit",
                    "brown",
                    "Quick decomposition, high potassium content",
                    false,
                    false,
                    "Food waste bin (brown) - collected weekly on Wednesdays",
                    "Green caddy for food waste - collected twice weekly",
                ),
                item(
                    "plastic_bottle_001",
                    "Plastic Bottle",
                    &["water bottle", "soda bottle", "drink bottle"],
                    "container",
                    "blue",
                    "Remove cap, rinse, check plastic number",
                    true,
                    true,
                    "Recycling bin (blue) if clean, general waste if contaminated",
                    "Mixed recycling bin - must be clean and cap removed",
                ),
                item(
                    "pizza_box_001",
                    "Pizza Box",
                    &["takeaway box", "cardboard box"],
                    "packaging",
                    "brown",
                    "Greasy boxes to general waste, clean parts to recycling",
                    true,
                    true,
                    "Clean cardboard -> recycling, greasy parts -> general waste",
                    "Tear off clean parts for recycling, rest to general waste",
                ),
                item(
                    "bread_001",
                    "Bread",
                    &["sliced bread", "loaf", "sandwich bread"],
                    "bread",
                    "brown",
                    "Break into pieces, moldy bread OK",
                    false,
                    false,
                    "Food waste bin (brown) - collected weekly on Wednesdays",
                    "Green caddy for food waste - collected twice weekly",
                ),
                item(
                    "cheese_001",
                    "Cheese",
                    &["cheddar", "mozzarella", "parmesan"],
                    "dairy",
                    "black",
                    "General waste only, attracts pests",
                    false,
                    true,
                    "General waste - not compostable",
                    "General waste - not compostable",
                ),
                item(
                    "coffee_cup_001",
                    "Coffee Cup",
                    &["disposable cup", "takeaway cup"],
                    "packaging",
                    "black",
                    "Most disposable cups not recyclable",
                    true,
                    true,
                    "General waste - disposable cups not recyclable",
                    "General waste - check for special collection",
                ),
                item(
                    "orange_001",
                    "Orange",
                    &["citrus", "mandarin", "clementine"],
                    "fruit",
                    "brown",
                    "Citrus benefits for compost, pest deterrent",
                    false,
                    false,
                    "Food waste bin (brown) - collected weekly on Wednesdays",
                    "Green caddy for food waste - collected twice weekly",
                ),
                item(
                    "yogurt_container_001",
                    "Yogurt Container",
                    &["yogurt pot", "dairy container"],
                    "packaging",
                    "blue",
                    "Empty contents, check container recyclability",
                    true,
                    true,
                    "Recycling if clean, general waste if contaminated",
                    "Mixed recycling if clean",
                ),
                item(
                    "egg_shells_001",
                    "Egg Shells",
                    &["eggshell", "egg shell"],
                    "organic",
                    "brown",
                    "Crush first, high calcium content",
                    false,
                    false,
                    "Food waste bin (brown) - collected weekly on Wednesdays",
                    "Green caddy for food waste - collected twice weekly",
                ),
            ],
        }
    }

    /// Case-insensitive substring search with paging. An empty query
    /// lists the whole catalog.
    pub fn search(&self, query: &str, limit: usize, offset: usize) -> Vec<FoodItem> {
        let query = query.trim().to_lowercase();

        let matches = self
            .items
            .iter()
            .filter(|item| query.is_empty() || item.matches(&query));

        matches.skip(offset).take(limit).cloned().collect()
    }

    pub fn by_id(&self, id: &str) -> Option<FoodItem> {
        self.items.iter().find(|item| item.id == id).cloned()
    }

    pub fn by_category(&self, category: &str) -> Vec<FoodItem> {
        let category = category.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.category.to_lowercase() == category)
            .cloned()
            .collect()
    }

    pub fn by_bin_color(&self, bin_color: &str) -> Vec<FoodItem> {
        let bin_color = bin_color.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.bin_color.to_lowercase() == bin_color)
            .cloned()
            .collect()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.items.iter().map(|item| item.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_matches_alternate_names() {
        let catalog = ItemCatalog::new();
        let results = catalog.search("takeaway", 20, 0);
        let ids: Vec<&str> = results.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["pizza_box_001", "coffee_cup_001"]);
    }

    #[test]
    fn empty_query_lists_everything_paged() {
        let catalog = ItemCatalog::new();
        assert_eq!(catalog.search("", 50, 0).len(), 10);
        assert_eq!(catalog.search("", 3, 0).len(), 3);
        assert_eq!(catalog.search("", 50, 8).len(), 2);
    }

    #[test]
    fn by_id_finds_known_items_only() {
        let catalog = ItemCatalog::new();
        assert_eq!(catalog.by_id("banana_001").unwrap().name, "Banana");
        assert!(catalog.by_id("caviar_001").is_none());
    }

    #[test]
    fn by_category_is_case_insensitive() {
        let catalog = ItemCatalog::new();
        assert_eq!(catalog.by_category("FRUIT").len(), 3);
        assert!(catalog.by_category("fish").is_empty());
    }

    #[test]
    fn by_bin_color_filters() {
        let catalog = ItemCatalog::new();
        assert_eq!(catalog.by_bin_color("blue").len(), 2);
        assert_eq!(catalog.by_bin_color("black").len(), 2);
    }

    #[test]
    fn categories_are_sorted_and_distinct() {
        let catalog = ItemCatalog::new();
        assert_eq!(
            catalog.categories(),
            ["bread", "container", "dairy", "fruit", "organic", "packaging"]
        );
    }
}
