//! Runtime settings for seed and undo operations.
//!
//! Everything here is read from the process environment once, at startup, and
//! then passed explicitly into the operations that need it. Nothing in the
//! seeding code consults the environment on its own.

use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Remote JSON document describing card-to-category bonus multipliers.
pub const DEFAULT_REWARDS_URL: &str =
    "https://raw.githubusercontent.com/andenacitelli/credit-card-bonuses-api/main/exports/data.json";

/// Deployment environment. Only `production` changes behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production database: clears truncate, reset identities and cascade
    Production,
    /// Any other environment: clears are plain deletes
    #[default]
    Development,
}

impl Environment {
    /// Returns true for the production environment.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    /// `"production"` (case-insensitive) selects production; every other value is development.
    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("production") {
            Ok(Self::Production)
        } else {
            Ok(Self::Development)
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Development => write!(f, "development"),
        }
    }
}

/// Settings shared by the seed and undo operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSettings {
    /// Production or not
    pub environment: Environment,
    /// Schema namespace qualifying table names on `PostgreSQL`
    pub schema: Option<String>,
    /// Where reward data is fetched from
    pub rewards_url: String,
    /// Optional timeout for the rewards request; no timeout when unset
    pub rewards_timeout: Option<Duration>,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            schema: None,
            rewards_url: DEFAULT_REWARDS_URL.to_string(),
            rewards_timeout: None,
        }
    }
}

impl SeedSettings {
    /// Loads settings from `APP_ENV`, `SCHEMA`, `REWARDS_URL` and `REWARDS_TIMEOUT_SECS`.
    ///
    /// Missing variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("APP_ENV")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        let schema = match std::env::var("SCHEMA") {
            Ok(value) if !value.trim().is_empty() => Some(validate_schema(value.trim())?),
            _ => None,
        };

        let rewards_url =
            std::env::var("REWARDS_URL").unwrap_or_else(|_| DEFAULT_REWARDS_URL.to_string());

        let rewards_timeout =
            optional_timeout(std::env::var("REWARDS_TIMEOUT_SECS").ok().as_deref())?;

        Ok(Self {
            environment,
            schema,
            rewards_url,
            rewards_timeout,
        })
    }

    /// Replaces the schema, validating it as a plain SQL identifier.
    pub fn with_schema(mut self, schema: &str) -> Result<Self> {
        self.schema = Some(validate_schema(schema)?);
        Ok(self)
    }
}

/// Schema names are interpolated into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` is accepted.
pub fn validate_schema(schema: &str) -> Result<String> {
    let mut chars = schema.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(schema.to_string())
    } else {
        Err(Error::Config {
            message: format!("Invalid schema name '{schema}'"),
        })
    }
}

/// Unset or blank means no timeout, like an unset `SCHEMA` means no schema.
fn optional_timeout(value: Option<&str>) -> Result<Option<Duration>> {
    match value {
        Some(value) if !value.trim().is_empty() => parse_timeout(value).map(Some),
        _ => Ok(None),
    }
}

fn parse_timeout(value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| Error::Config {
            message: format!("Invalid REWARDS_TIMEOUT_SECS '{value}': {e}"),
        })
}
