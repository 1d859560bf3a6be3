//! Category entity - Represents a spending category in a two-level tree.
//!
//! Top-level categories have no parent. Subcategories reference exactly one
//! top-level category through `parent_category_id`. Uniqueness of
//! `(name, parent_category_id)` is kept by lookup-before-insert, not by a constraint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Category name (e.g., "dining", "restaurants")
    pub name: String,
    /// Parent category ID for subcategories, None for top-level categories
    pub parent_category_id: Option<i32>,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each subcategory belongs to one parent category
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentCategoryId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Parent,
    /// One category has many reward points
    #[sea_orm(has_many = "super::reward_point::Entity")]
    RewardPoints,
}

impl Related<super::reward_point::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RewardPoints.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
