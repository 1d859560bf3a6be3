//! Reward point entity - "card X earns `bonus_point` x `multiplier_type` in category Y".
//!
//! There is no uniqueness constraint, so reseeding without clearing first
//! duplicates rows.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reward point database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reward_points")]
pub struct Model {
    /// Unique identifier for the reward point row
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the card earning the bonus
    pub card_id: i32,
    /// ID of the category the bonus applies to
    pub category_id: i32,
    /// Bonus amount (e.g., 3.0 for "3x")
    pub bonus_point: f64,
    /// How the bonus is applied, e.g. `"points"` or `"cashback"`
    pub multiplier_type: String,
}

/// Defines relationships between `RewardPoint` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reward point belongs to one card
    #[sea_orm(
        belongs_to = "super::card::Entity",
        from = "Column::CardId",
        to = "super::card::Column::Id",
        on_delete = "Cascade"
    )]
    Card,
    /// Each reward point belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
