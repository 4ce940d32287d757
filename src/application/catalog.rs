//! Static feature/limit catalog backing the pricing comparison matrix.
//!
//! The catalog is fixed associative data embedded at compile time and parsed
//! once. All lookup fallbacks live here so formatting code never has to
//! chain defaults.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

/// Description shown for features the catalog does not document.
const DEFAULT_FEATURE_DESCRIPTION: &str = "No description available";

/// Category assigned to features the catalog does not know.
pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(rename = "featureDescriptions")]
    feature_descriptions: HashMap<String, String>,
    #[serde(rename = "featureCategories")]
    feature_categories: HashMap<String, String>,
    #[serde(rename = "categoryLabels")]
    category_labels: HashMap<String, String>,
    #[serde(rename = "limitLabels")]
    limit_labels: HashMap<String, String>,
    #[serde(rename = "limitUnits")]
    limit_units: HashMap<String, String>,
}

static RAW_CATALOG: &str = include_str!("../../catalog/features.json");

static CATALOG: Lazy<Catalog> =
    Lazy::new(|| serde_json::from_str(RAW_CATALOG).expect("failed to parse feature catalog"));

pub fn feature_description(feature: &str) -> String {
    CATALOG
        .feature_descriptions
        .get(feature)
        .cloned()
        .unwrap_or_else(|| DEFAULT_FEATURE_DESCRIPTION.to_string())
}

pub fn feature_category(feature: &str) -> String {
    CATALOG
        .feature_categories
        .get(feature)
        .cloned()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

pub fn category_label(category: &str) -> String {
    CATALOG
        .category_labels
        .get(category)
        .cloned()
        .unwrap_or_else(|| title_case(category))
}

pub fn limit_label(limit: &str) -> String {
    CATALOG
        .limit_labels
        .get(limit)
        .cloned()
        .unwrap_or_else(|| title_case(limit))
}

pub fn limit_unit(limit: &str) -> String {
    CATALOG.limit_units.get(limit).cloned().unwrap_or_default()
}

/// Turns a snake_case key into a display label: "api_access" -> "Api Access".
pub fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_parses() {
        assert!(!CATALOG.feature_descriptions.is_empty());
        assert!(!CATALOG.limit_labels.is_empty());
    }

    #[test]
    fn test_known_feature_lookups() {
        assert_eq!(
            feature_description("sso"),
            "Single sign-on through your identity provider (SAML or OIDC)"
        );
        assert_eq!(feature_category("sso"), "security");
        assert_eq!(category_label("security"), "Security & Compliance");
    }

    #[test]
    fn test_unknown_feature_falls_back() {
        assert_eq!(feature_description("hoverboards"), DEFAULT_FEATURE_DESCRIPTION);
        assert_eq!(feature_category("hoverboards"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_unknown_category_label_title_cased() {
        assert_eq!(category_label("general"), "General");
        assert_eq!(category_label("beta_features"), "Beta Features");
    }

    #[test]
    fn test_limit_lookups_and_fallbacks() {
        assert_eq!(limit_label("max_storage_mb"), "File storage");
        assert_eq!(limit_unit("max_storage_mb"), "MB");
        assert_eq!(limit_label("max_widgets"), "Max Widgets");
        assert_eq!(limit_unit("max_widgets"), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("api_access"), "Api Access");
        assert_eq!(title_case("sso"), "Sso");
        assert_eq!(title_case("max_api_calls_per_month"), "Max Api Calls Per Month");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_every_assigned_category_has_a_label() {
        for category in CATALOG.feature_categories.values() {
            assert!(
                CATALOG.category_labels.contains_key(category),
                "category {category} has no display label"
            );
        }
    }
}
