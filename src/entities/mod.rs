//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod card;
pub mod category;
pub mod reward_point;

// Re-export specific types to avoid conflicts
pub use card::{Column as CardColumn, Entity as Card, Model as CardModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use reward_point::{
    Column as RewardPointColumn, Entity as RewardPoint, Model as RewardPointModel,
};
