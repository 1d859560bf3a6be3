//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and building reward fixtures.

use crate::{
    core::card,
    entities,
    errors::Result,
    seeds::source::{CardRewards, RewardDocument, RewardEntry},
};
use sea_orm::DatabaseConnection;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a card with the given name.
pub async fn create_test_card(db: &DatabaseConnection, name: &str) -> Result<entities::card::Model> {
    card::create_card(db, name).await
}

/// Builds a reward document from `(card name, [(category, bonus, multiplier type)])` pairs.
pub fn reward_document(cards: Vec<(&str, Vec<(&str, f64, &str)>)>) -> RewardDocument {
    RewardDocument {
        cards: cards
            .into_iter()
            .map(|(name, entries)| CardRewards {
                name: name.to_string(),
                reward_points: entries
                    .into_iter()
                    .map(|(category, bonus_point, multiplier_type)| RewardEntry {
                        category_name: category.to_string(),
                        bonus_point,
                        multiplier_type: multiplier_type.to_string(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Answers a single HTTP request on a local port with `status` and `body`.
///
/// Returns the URL to fetch. The connection is closed after the response.
pub async fn serve_http_once(status: &str, content_type: &str, body: &str) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/data.json", listener.local_addr()?);
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };
        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    });

    Ok(url)
}
