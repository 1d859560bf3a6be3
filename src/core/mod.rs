/// Category lookups and find-or-create operations
pub mod category;

/// Card lookups
pub mod card;

/// Reward point creation and listing
pub mod reward_point;
