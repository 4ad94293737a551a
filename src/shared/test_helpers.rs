#[cfg(test)]
use std::str::FromStr;

#[cfg(test)]
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
#[cfg(test)]
use sqlx::SqlitePool;

#[cfg(test)]
use crate::core::config::UploadConfig;
#[cfg(test)]
use crate::modules::storage::PhotoStore;

/// Fresh in-memory database with migrations applied.
///
/// Pinned to a single pooled connection: every sqlite `:memory:` connection
/// is its own private database, so a second connection would see no tables.
#[cfg(test)]
#[allow(dead_code)]
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

/// Photo store rooted at a caller-owned directory (usually a tempdir).
#[cfg(test)]
#[allow(dead_code)]
pub fn create_test_photo_store(dir: &std::path::Path) -> PhotoStore {
    let config = UploadConfig {
        dir: dir.to_path_buf(),
        allowed_extensions: crate::shared::constants::DEFAULT_ALLOWED_EXTENSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    PhotoStore::new(&config).unwrap()
}
