//! Card entity - Credit cards seeded elsewhere in the application.
//!
//! Seeding only ever looks cards up by name; the table is defined here so it
//! can be queried and created for local databases.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Card database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    /// Unique identifier for the card
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Card product name as published by the issuer
    pub name: String,
}

/// Defines relationships between Card and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One card has many reward points
    #[sea_orm(has_many = "super::reward_point::Entity")]
    RewardPoints,
}

impl Related<super::reward_point::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RewardPoints.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
