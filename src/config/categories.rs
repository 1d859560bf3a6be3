//! Category tree configuration.
//!
//! The built-in tree is the fixed dataset seeded into every environment. A
//! TOML file with the same shape can replace it for local experiments:
//!
//! ```toml
//! [[categories]]
//! name = "dining"
//! subcategories = ["restaurants", "fast food"]
//! ```

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Configuration structure representing a category tree file
#[derive(Debug, Deserialize)]
pub struct CategoryTreeConfig {
    /// Top-level categories to seed
    pub categories: Vec<CategorySeed>,
}

/// A top-level category and the names of its subcategories
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CategorySeed {
    /// Name of the top-level category
    pub name: String,
    /// Names of subcategories under it
    #[serde(default)]
    pub subcategories: Vec<String>,
}

impl CategorySeed {
    fn new(name: &str, subcategories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            subcategories: subcategories.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Returns the built-in two-level category tree.
#[must_use]
pub fn default_category_tree() -> Vec<CategorySeed> {
    vec![
        CategorySeed::new("dining", &["restaurants", "fast food"]),
        CategorySeed::new("travel", &["airlines", "hotels", "car rentals"]),
        CategorySeed::new("groceries", &["supermarkets", "specialty stores"]),
        CategorySeed::new("gas", &["gas stations", "electric charging stations"]),
        CategorySeed::new("entertainment", &["movies", "concerts", "theaters"]),
        CategorySeed::new("online shopping", &["e-commerce", "subscriptions"]),
    ]
}

/// Loads a category tree from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or required fields are missing
/// - The tree fails [`validate_category_tree`]
pub fn load_category_tree<P: AsRef<Path>>(path: P) -> Result<Vec<CategorySeed>> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading category tree from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read category file {}: {e}", path_ref.display()),
    })?;
    parse_category_tree(&contents)
}

/// Parses a category tree from TOML text.
pub fn parse_category_tree(contents: &str) -> Result<Vec<CategorySeed>> {
    let config: CategoryTreeConfig = toml::from_str(contents)?;
    validate_category_tree(&config.categories)?;
    Ok(config.categories)
}

/// Checks that `tree` seeds as exactly two levels.
///
/// Top-level lookups match by name at any level, so a top-level name that is
/// also used as a subcategory would hang a third level off that subcategory.
///
/// # Errors
/// Returns `Error::Config` if:
/// - A category or subcategory name is empty
/// - A top-level name is also listed as a subcategory
/// - A subcategory is listed twice under the same parent
pub fn validate_category_tree(tree: &[CategorySeed]) -> Result<()> {
    let subcategory_names: HashSet<&str> = tree
        .iter()
        .flat_map(|seed| seed.subcategories.iter().map(String::as_str))
        .collect();

    for seed in tree {
        if seed.name.trim().is_empty() || seed.subcategories.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::Config {
                message: "Category names cannot be empty".to_string(),
            });
        }

        if subcategory_names.contains(seed.name.as_str()) {
            return Err(Error::Config {
                message: format!(
                    "Category '{}' is used both as a top-level category and a subcategory",
                    seed.name
                ),
            });
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = seed.subcategories.iter().find(|s| !seen.insert(s.as_str())) {
            return Err(Error::Config {
                message: format!(
                    "Subcategory '{duplicate}' is listed twice under '{}'",
                    seed.name
                ),
            });
        }
    }

    Ok(())
}
