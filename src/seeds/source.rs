//! Reward data sources.
//!
//! The remote document looks like:
//!
//! ```json
//! {"cards": [{"name": "Amex Gold", "reward_points": [
//!     {"category_id": "dining", "bonus_point": 4, "multiplier_type": "points"}
//! ]}]}
//! ```
//!
//! `category_id` holds a category NAME, not an identifier. It is exposed as
//! [`RewardEntry::category_name`] and always resolved by name.

use crate::config::settings::SeedSettings;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// The whole reward document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RewardDocument {
    /// One entry per card; missing means empty
    #[serde(default)]
    pub cards: Vec<CardRewards>,
}

/// Reward entries published for one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRewards {
    /// Card name, matched exactly against `cards.name`
    pub name: String,
    /// Bonus entries; missing means empty
    #[serde(default)]
    pub reward_points: Vec<RewardEntry>,
}

/// One bonus multiplier for a card in a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    /// Category name (serialized as `category_id`)
    #[serde(rename = "category_id")]
    pub category_name: String,
    /// Bonus amount
    pub bonus_point: f64,
    /// How the bonus applies, e.g. `"points"` or `"cashback"`; not validated
    pub multiplier_type: String,
}

impl RewardDocument {
    /// Parses a reward document from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Total number of reward entries across all cards.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.cards.iter().map(|c| c.reward_points.len()).sum()
    }
}

/// Something that can produce a [`RewardDocument`].
pub trait RewardSource {
    /// Fetches the document. Any failure aborts the seeding run.
    fn fetch(&self) -> impl Future<Output = Result<RewardDocument>> + Send;
}

/// An in-memory document is its own source.
impl RewardSource for RewardDocument {
    async fn fetch(&self) -> Result<RewardDocument> {
        Ok(self.clone())
    }
}

/// Fetches the document with a single HTTP GET. No retries.
#[derive(Debug, Clone)]
pub struct HttpRewardSource {
    url: String,
    timeout: Option<Duration>,
}

impl HttpRewardSource {
    /// Source for `url` with no request timeout.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    /// Source using the configured URL and timeout.
    #[must_use]
    pub fn from_settings(settings: &SeedSettings) -> Self {
        let source = Self::new(settings.rewards_url.clone());
        match settings.rewards_timeout {
            Some(timeout) => source.with_timeout(timeout),
            None => source,
        }
    }

    /// Sets a timeout for the whole request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The URL this source fetches.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RewardSource for HttpRewardSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<RewardDocument> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        debug!("Requesting reward data from {}", self.url());
        let document: RewardDocument = client
            .get(self.url())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!(
            "Fetched reward data: {} cards, {} entries",
            document.cards.len(),
            document.entry_count()
        );
        Ok(document)
    }
}

/// Reads the document from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileRewardSource {
    path: PathBuf,
}

impl FileRewardSource {
    /// Source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RewardSource for FileRewardSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<RewardDocument> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let document = RewardDocument::from_json(&contents)?;
        info!(
            "Loaded reward data: {} cards, {} entries",
            document.cards.len(),
            document.entry_count()
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::serve_http_once;

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "cards": [
                {
                    "name": "Amex Gold",
                    "reward_points": [
                        {"category_id": "dining", "bonus_point": 4, "multiplier_type": "points"},
                        {"category_id": "groceries", "bonus_point": 4.5, "multiplier_type": "points"}
                    ]
                },
                {"name": "No Rewards Card"}
            ],
            "unrelated": true
        }"#;

        let document = RewardDocument::from_json(json).unwrap();
        assert_eq!(document.cards.len(), 2);
        assert_eq!(document.entry_count(), 2);

        let entry = &document.cards[0].reward_points[1];
        assert_eq!(entry.category_name, "groceries");
        assert_eq!(entry.bonus_point, 4.5);
        assert_eq!(entry.multiplier_type, "points");
        assert!(document.cards[1].reward_points.is_empty());
    }

    #[test]
    fn test_missing_cards_is_empty() {
        let document = RewardDocument::from_json("{}").unwrap();
        assert!(document.cards.is_empty());
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(matches!(
            RewardDocument::from_json("<html>not json</html>"),
            Err(Error::Json(_))
        ));

        let non_numeric_bonus = r#"{"cards": [{"name": "X", "reward_points": [
            {"category_id": "gas", "bonus_point": "three", "multiplier_type": "points"}
        ]}]}"#;
        assert!(RewardDocument::from_json(non_numeric_bonus).is_err());

        let missing_name = r#"{"cards": [{"reward_points": []}]}"#;
        assert!(RewardDocument::from_json(missing_name).is_err());
    }

    #[test]
    fn test_serializes_category_name_as_category_id() {
        let entry = RewardEntry {
            category_name: "travel".to_string(),
            bonus_point: 2.0,
            multiplier_type: "miles".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["category_id"], "travel");
    }

    #[test]
    fn test_http_source_settings() {
        let settings = SeedSettings {
            rewards_url: "http://localhost:9/data.json".to_string(),
            rewards_timeout: Some(Duration::from_secs(5)),
            ..SeedSettings::default()
        };
        let source = HttpRewardSource::from_settings(&settings);
        assert_eq!(source.url(), "http://localhost:9/data.json");
        assert_eq!(source.timeout, Some(Duration::from_secs(5)));

        let source = HttpRewardSource::from_settings(&SeedSettings::default());
        assert!(source.timeout.is_none());
    }

    #[tokio::test]
    async fn test_in_memory_source() -> Result<()> {
        let document = RewardDocument::default();
        assert_eq!(document.fetch().await?, document);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileRewardSource::new("does/not/exist.json");
        assert!(matches!(source.fetch().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_http_source_transport_error() {
        // Nothing listens on the discard port
        let source = HttpRewardSource::new("http://127.0.0.1:9/data.json")
            .with_timeout(Duration::from_secs(2));
        assert!(matches!(source.fetch().await, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn test_http_source_error_status() -> Result<()> {
        let url = serve_http_once(
            "500 Internal Server Error",
            "application/json",
            r#"{"cards": []}"#,
        )
        .await?;
        let source = HttpRewardSource::new(url).with_timeout(Duration::from_secs(5));
        assert!(matches!(source.fetch().await, Err(Error::Http(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_http_source_rejects_non_json_body() -> Result<()> {
        let url = serve_http_once("200 OK", "text/html", "<html>maintenance</html>").await?;
        let source = HttpRewardSource::new(url).with_timeout(Duration::from_secs(5));
        assert!(matches!(source.fetch().await, Err(Error::Http(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_http_source_fetches_document() -> Result<()> {
        let body = r#"{"cards": [{"name": "Amex Gold", "reward_points": [
            {"category_id": "dining", "bonus_point": 4, "multiplier_type": "points"}
        ]}]}"#;
        let url = serve_http_once("200 OK", "application/json", body).await?;
        let document = HttpRewardSource::new(url).fetch().await?;
        assert_eq!(document.cards.len(), 1);
        assert_eq!(document.entry_count(), 1);
        Ok(())
    }
}
