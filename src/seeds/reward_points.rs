//! Reward point seeding and undo.
//!
//! Cards must already exist; entries for unknown cards are skipped without
//! error. Categories named by the data but missing from the database are
//! created as top-level categories. Reward rows are never deduplicated.

use crate::config::settings::SeedSettings;
use crate::core::card::find_card_by_name;
use crate::core::category::find_or_create_category;
use crate::core::reward_point::create_reward_point;
use crate::errors::Result;
use crate::seeds::clear::{ClearOptions, SeedTable, clear_table};
use crate::seeds::source::{RewardDocument, RewardSource};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};

/// What a reward point seeding run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardSeedReport {
    /// Cards in the document that exist in the database
    pub cards_matched: usize,
    /// Names of cards in the document with no matching row, in document order
    pub skipped_cards: Vec<String>,
    /// Categories created because the data referenced an unknown name
    pub categories_created: usize,
    /// Reward point rows inserted
    pub reward_points_created: usize,
}

/// Fetches the reward document from `source` and seeds it.
///
/// A fetch failure aborts before the database is touched.
#[instrument(skip_all)]
pub async fn seed_reward_points<S>(db: &DatabaseConnection, source: &S) -> Result<RewardSeedReport>
where
    S: RewardSource,
{
    let document = source.fetch().await?;
    seed_reward_document(db, &document).await
}

/// Seeds an already fetched reward document in one transaction.
#[instrument(skip_all, fields(cards = document.cards.len()))]
pub async fn seed_reward_document(
    db: &DatabaseConnection,
    document: &RewardDocument,
) -> Result<RewardSeedReport> {
    let txn = db.begin().await?;
    let mut report = RewardSeedReport::default();

    for card_rewards in &document.cards {
        let Some(card) = find_card_by_name(&txn, &card_rewards.name).await? else {
            debug!("Card '{}' not found, skipping", card_rewards.name);
            report.skipped_cards.push(card_rewards.name.clone());
            continue;
        };
        report.cards_matched += 1;

        for entry in &card_rewards.reward_points {
            let (category, created) = find_or_create_category(&txn, &entry.category_name).await?;
            if created {
                debug!(
                    "Created category '{}' referenced by card '{}'",
                    category.name, card.name
                );
                report.categories_created += 1;
            }

            create_reward_point(
                &txn,
                card.id,
                category.id,
                entry.bonus_point,
                &entry.multiplier_type,
            )
            .await?;
            report.reward_points_created += 1;
        }
    }

    txn.commit().await?;
    info!(
        "Seeded {} reward points for {} cards ({} skipped, {} categories created)",
        report.reward_points_created,
        report.cards_matched,
        report.skipped_cards.len(),
        report.categories_created
    );
    Ok(report)
}

/// Removes every reward point, in any environment.
#[instrument(skip_all, fields(environment = %settings.environment))]
pub async fn undo_reward_points(db: &DatabaseConnection, settings: &SeedSettings) -> Result<()> {
    let txn = db.begin().await?;
    clear_table(
        &txn,
        SeedTable::RewardPoints,
        settings.schema.as_deref(),
        ClearOptions::for_environment(settings.environment),
    )
    .await?;
    txn.commit().await?;
    Ok(())
}
