//! Database configuration module.
//!
//! This module handles database connections and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema used by local runs and tests
//! always matches the Rust structs. Production databases are migrated by the
//! application itself; creating tables here is opt-in.

use crate::entities::{Card, Category, RewardPoint};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Fallback used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/rewards.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database: {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the cards, categories and reward points tables if they do not exist.
///
/// Tables are created in dependency order so the foreign keys on
/// `reward_points` can resolve.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut card_table = schema.create_table_from_entity(Card);
    let mut category_table = schema.create_table_from_entity(Category);
    let mut reward_point_table = schema.create_table_from_entity(RewardPoint);

    card_table.if_not_exists();
    category_table.if_not_exists();
    reward_point_table.if_not_exists();

    db.execute(builder.build(&card_table)).await?;
    db.execute(builder.build(&category_table)).await?;
    db.execute(builder.build(&reward_point_table)).await?;

    info!("Ensured cards, categories and reward_points tables exist");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CardModel, CategoryModel, RewardPointModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<CardModel> = Card::find().limit(1).all(&db).await?;
        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<RewardPointModel> = RewardPoint::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
