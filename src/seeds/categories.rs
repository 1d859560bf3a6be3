//! Category seeding and undo.
//!
//! Seeding is idempotent: every insert is preceded by a lookup, so running it
//! again against a seeded database creates nothing. The whole run is one
//! transaction; parent ids come back from the insert itself, so subcategories
//! can be linked without an intermediate commit.

use crate::config::categories::CategorySeed;
use crate::config::settings::SeedSettings;
use crate::core::category::{find_or_create_category, find_or_create_subcategory};
use crate::errors::Result;
use crate::seeds::clear::{ClearOptions, SeedTable, clear_table};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};

/// What a category seeding run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySeedReport {
    /// Top-level categories inserted
    pub categories_created: usize,
    /// Top-level categories that already existed
    pub categories_existing: usize,
    /// Subcategories inserted
    pub subcategories_created: usize,
    /// Subcategories that already existed under the same parent
    pub subcategories_existing: usize,
}

/// Ensures every category and subcategory of `tree` exists exactly once.
///
/// Top-level categories are matched by name; subcategories by name and parent.
/// Nothing is committed unless the whole tree is processed successfully.
#[instrument(skip_all, fields(categories = tree.len()))]
pub async fn seed_categories(
    db: &DatabaseConnection,
    tree: &[CategorySeed],
) -> Result<CategorySeedReport> {
    let txn = db.begin().await?;
    let mut report = CategorySeedReport::default();

    for seed in tree {
        let (category, created) = find_or_create_category(&txn, &seed.name).await?;
        if created {
            debug!("Created category '{}' (id {})", category.name, category.id);
            report.categories_created += 1;
        } else {
            report.categories_existing += 1;
        }

        for subcategory_name in &seed.subcategories {
            let (subcategory, created) =
                find_or_create_subcategory(&txn, subcategory_name, category.id).await?;
            if created {
                debug!(
                    "Created subcategory '{}' under '{}'",
                    subcategory.name, category.name
                );
                report.subcategories_created += 1;
            } else {
                report.subcategories_existing += 1;
            }
        }
    }

    txn.commit().await?;
    info!(
        "Seeded categories: {} created, {} existing; subcategories: {} created, {} existing",
        report.categories_created,
        report.categories_existing,
        report.subcategories_created,
        report.subcategories_existing
    );
    Ok(report)
}

/// Removes every category.
///
/// In production this truncates, restarting identities and cascading to
/// reward points. Elsewhere it is a plain delete.
#[instrument(skip_all, fields(environment = %settings.environment))]
pub async fn undo_categories(db: &DatabaseConnection, settings: &SeedSettings) -> Result<()> {
    let txn = db.begin().await?;
    clear_table(
        &txn,
        SeedTable::Categories,
        settings.schema.as_deref(),
        ClearOptions::for_environment(settings.environment),
    )
    .await?;
    txn.commit().await?;
    Ok(())
}
