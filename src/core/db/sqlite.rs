use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::core::db::storage::{DEFAULT_QUOTA_BYTES, KeyValueStorage, StorageError};

/// Durable local storage backed by a single SQLite file.
pub struct SqliteStorage {
    path: PathBuf,
    pool: SqlitePool,
    quota: usize,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("path", &self.path)
            .field("quota", &self.quota)
            .finish()
    }
}

impl SqliteStorage {
    /// Opens (or creates) the storage file and applies pending migrations.
    pub async fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create storage directory {:?}", parent))?;
        }

        let connect_opts = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await
            .with_context(|| format!("Failed to open storage {:?}", path))?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            path,
            pool,
            quota: DEFAULT_QUOTA_BYTES,
        })
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes the write-ahead log and releases the file.
    pub async fn close(&self) -> anyhow::Result<()> {
        sqlx::query("PRAGMA wal_checkpoint(TRUNCATE);")
            .execute(&self.pool)
            .await?;
        self.pool.close().await;
        Ok(())
    }
}

impl KeyValueStorage for SqliteStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM local_storage WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let used = sqlx::query_scalar::<_, i64>(
            r#"SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
            FROM local_storage WHERE key != $1"#,
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await?;

        let size = used.max(0) as usize + key.len() + value.len();
        if size > self.quota {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                size,
                limit: self.quota,
            });
        }

        let updated_at = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
        sqlx::query(
            r#"INSERT INTO local_storage (key, value, updated_at) VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM local_storage WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
