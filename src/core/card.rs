//! Card lookups. Cards are owned by another part of the application; seeding
//! only reads them.

use crate::{
    entities::{Card, card},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Finds a card by its exact name.
pub async fn find_card_by_name<C>(db: &C, name: &str) -> Result<Option<card::Model>>
where
    C: ConnectionTrait,
{
    Card::find()
        .filter(card::Column::Name.eq(name))
        .order_by_asc(card::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a card. Used to prepare local databases and test fixtures.
///
/// # Errors
/// Returns an error if the name is empty or whitespace-only, or the insert fails.
pub async fn create_card<C>(db: &C, name: &str) -> Result<card::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Card name cannot be empty".to_string(),
        });
    }

    let card = card::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    card.insert(db).await.map_err(Into::into)
}
