use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::core::config::DatabaseConfig;

/// Opens the SQLite pool described by `DATABASE_URL`.
///
/// The backend is fixed and announced at startup; a URL for any other
/// database is a configuration error, not a fallback.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    if !config.url.starts_with("sqlite:") {
        return Err(sqlx::Error::Configuration(
            format!(
                "unsupported DATABASE_URL '{}': this service only runs on sqlite",
                config.url
            )
            .into(),
        ));
    }

    info!("Using SQLite database at {}", config.url);

    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect_with(options)
        .await
}
