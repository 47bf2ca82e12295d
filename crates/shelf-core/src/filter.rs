// ── Local filter ──
//
// Pure derivation of the displayed subset from the loaded set. Recomputed
// in full on every input change; nothing is cached across input tuples.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shelf_api::Product;

/// Category constraint. `All` is the "no constraint" sentinel and is
/// spelled `"All"` wherever categories are strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All";

    /// Exact, case-sensitive category match.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Only(c) => c,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => CategoryFilter::ALL_LABEL.to_owned(),
            CategoryFilter::Only(c) => c,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search term and category currently applied to the loaded set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, category: impl Into<CategoryFilter>) -> Self {
        Self {
            search_term: search_term.into(),
            category: category.into(),
        }
    }

    /// `true` when neither predicate constrains anything.
    pub fn is_identity(&self) -> bool {
        self.search_term.is_empty() && self.category == CategoryFilter::All
    }

    /// Both predicates, ANDed: case-insensitive title substring and
    /// exact category.
    pub fn matches(&self, product: &Product) -> bool {
        title_matches(&product.title, &self.search_term.to_lowercase())
            && self.category.matches(&product.category)
    }
}

fn title_matches(title: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || title.to_lowercase().contains(needle_lower)
}

/// Stable filter: the result is a subsequence of `items` in the same
/// relative order.
pub fn filter_products(items: &[Product], filter: &FilterState) -> Vec<Product> {
    let needle = filter.search_term.to_lowercase();
    items
        .iter()
        .filter(|p| title_matches(&p.title, &needle) && filter.category.matches(&p.category))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product(id: u64, title: &str, category: &str) -> Product {
        Product {
            id,
            title: title.into(),
            description: String::new(),
            price: 1.0,
            image: String::new(),
            category: category.into(),
            rating: None,
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Shirt", "Clothes"),
            product(2, "Mug", "Home"),
            product(3, "SHORTS", "Clothes"),
            product(4, "Wash bag", "Home"),
            product(5, "Sweatshirt", "clothes"),
        ]
    }

    fn ids(items: &[Product]) -> Vec<u64> {
        items.iter().map(|p| p.id).collect()
    }

    #[test]
    fn identity_filter_returns_everything_in_order() {
        let items = sample();
        let filter = FilterState::default();
        assert!(filter.is_identity());
        assert_eq!(filter_products(&items, &filter), items);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let items = vec![product(1, "Shirt", "Clothes"), product(2, "Mug", "Home")];
        let result = filter_products(&items, &FilterState::new("sh", "All"));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn uppercase_term_matches_lowercase_title() {
        let result = filter_products(&sample(), &FilterState::new("SH", CategoryFilter::All));
        assert_eq!(ids(&result), vec![1, 3, 4, 5]);
    }

    #[test]
    fn category_is_exact_and_case_sensitive() {
        let result = filter_products(&sample(), &FilterState::new("", "Clothes"));
        assert_eq!(ids(&result), vec![1, 3]);

        let result = filter_products(&sample(), &FilterState::new("", "clothes"));
        assert_eq!(ids(&result), vec![5]);
    }

    #[test]
    fn predicates_are_anded() {
        let result = filter_products(&sample(), &FilterState::new("sh", "Home"));
        assert_eq!(ids(&result), vec![4]);
    }

    #[test]
    fn unknown_category_yields_nothing() {
        let result = filter_products(&sample(), &FilterState::new("", "Garden"));
        assert!(result.is_empty());
    }

    #[test]
    fn result_is_sound_and_complete() {
        let items = sample();
        let filters = [
            FilterState::new("s", "All"),
            FilterState::new("s", "Clothes"),
            FilterState::new("mug", "Home"),
            FilterState::new("zzz", "All"),
            FilterState::new("", "Home"),
        ];
        for filter in &filters {
            let result = filter_products(&items, filter);
            assert!(result.iter().all(|p| filter.matches(p)), "{filter:?}");
            let expected: Vec<_> = items.iter().filter(|p| filter.matches(p)).cloned().collect();
            assert_eq!(result, expected, "{filter:?}");
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let filter = FilterState::new("sh", "Clothes");
        let once = filter_products(&sample(), &filter);
        let twice = filter_products(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn all_sentinel_round_trips_through_strings() {
        assert_eq!(CategoryFilter::from("All"), CategoryFilter::All);
        assert_eq!(
            "jewelery".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only("jewelery".into()))
        );
        assert_eq!(CategoryFilter::All.to_string(), "All");
        assert_eq!(String::from(CategoryFilter::Only("x".into())), "x");
    }
}
