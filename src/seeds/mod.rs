//! Seed and undo operations for the categories and reward points tables.
//!
//! Categories are seeded before reward points and undone after them, so reward
//! rows can always resolve the categories they reference.

/// Uniform table clearing used by every undo operation
pub mod clear;

/// Category tree seeding and undo
pub mod categories;

/// Reward point seeding and undo
pub mod reward_points;

/// Reward document shape and the sources it can be fetched from
pub mod source;

pub use categories::{CategorySeedReport, seed_categories, undo_categories};
pub use clear::{ClearOptions, SeedTable, clear_table};
pub use reward_points::{
    RewardSeedReport, seed_reward_document, seed_reward_points, undo_reward_points,
};
pub use source::{FileRewardSource, HttpRewardSource, RewardDocument, RewardSource};

use crate::config::categories::CategorySeed;
use crate::config::settings::SeedSettings;
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// Runs the category seeder, then the reward point seeder.
#[instrument(skip_all)]
pub async fn seed_all<S>(
    db: &DatabaseConnection,
    tree: &[CategorySeed],
    source: &S,
) -> Result<(CategorySeedReport, RewardSeedReport)>
where
    S: RewardSource,
{
    let categories = seed_categories(db, tree).await?;
    let rewards = seed_reward_points(db, source).await?;
    info!("All seeds applied");
    Ok((categories, rewards))
}

/// Undoes reward points, then categories.
#[instrument(skip_all)]
pub async fn undo_all(db: &DatabaseConnection, settings: &SeedSettings) -> Result<()> {
    undo_reward_points(db, settings).await?;
    undo_categories(db, settings).await?;
    info!("All seeds undone");
    Ok(())
}
