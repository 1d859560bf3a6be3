//! Reward point business logic.
//!
//! Rows are inserted as given: neither `bonus_point` nor `multiplier_type` is
//! validated, and duplicates are allowed.

use crate::{
    entities::{RewardPoint, reward_point},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Inserts a reward point linking a card and a category.
pub async fn create_reward_point<C>(
    db: &C,
    card_id: i32,
    category_id: i32,
    bonus_point: f64,
    multiplier_type: &str,
) -> Result<reward_point::Model>
where
    C: ConnectionTrait,
{
    let reward_point = reward_point::ActiveModel {
        card_id: Set(card_id),
        category_id: Set(category_id),
        bonus_point: Set(bonus_point),
        multiplier_type: Set(multiplier_type.to_string()),
        ..Default::default()
    };
    reward_point.insert(db).await.map_err(Into::into)
}

/// Retrieves every reward point ordered by id.
pub async fn get_all_reward_points<C>(db: &C) -> Result<Vec<reward_point::Model>>
where
    C: ConnectionTrait,
{
    RewardPoint::find()
        .order_by_asc(reward_point::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the reward points of one card, ordered by id.
#[cfg(test)]
pub async fn get_reward_points_for_card<C>(db: &C, card_id: i32) -> Result<Vec<reward_point::Model>>
where
    C: ConnectionTrait,
{
    RewardPoint::find()
        .filter(reward_point::Column::CardId.eq(card_id))
        .order_by_asc(reward_point::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::category::find_or_create_category;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_reward_point() -> Result<()> {
        let db = setup_test_db().await?;
        let card = create_test_card(&db, "Amex Gold").await?;
        let (dining, _) = find_or_create_category(&db, "dining").await?;

        let reward = create_reward_point(&db, card.id, dining.id, 4.0, "points").await?;
        assert_eq!(reward.card_id, card.id);
        assert_eq!(reward.category_id, dining.id);
        assert_eq!(reward.bonus_point, 4.0);
        assert_eq!(reward.multiplier_type, "points");

        // Duplicates are allowed
        create_reward_point(&db, card.id, dining.id, 4.0, "points").await?;
        assert_eq!(get_reward_points_for_card(&db, card.id).await?.len(), 2);
        assert_eq!(get_all_reward_points(&db).await?.len(), 2);
        Ok(())
    }
}
