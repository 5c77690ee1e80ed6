mod common;
use common::*;

use megaprop::core::db::{SqliteStorage, StorageError};

async fn create_test_storage() -> anyhow::Result<(SqliteStorage, tempfile::TempDir)> {
    let dir = tempfile::TempDir::new()?;
    let storage = SqliteStorage::open(dir.path().join("data").join("storage.db")).await?;
    Ok((storage, dir))
}

#[tokio::test]
async fn test_items_survive_reopening() -> anyhow::Result<()> {
    let (storage, dir) = create_test_storage().await?;
    assert_eq!(storage.get_item(TEST_KEY).await?, None);

    storage.set_item(TEST_KEY, "primero").await?;
    storage.set_item(TEST_KEY, "segundo").await?;
    storage.set_item("other", "x").await?;
    storage.remove_item("other").await?;
    let path = storage.path().to_path_buf();
    storage.close().await?;

    let reopened = SqliteStorage::open(&path).await?;
    assert_eq!(reopened.get_item(TEST_KEY).await?.as_deref(), Some("segundo"));
    assert_eq!(reopened.get_item("other").await?, None);
    reopened.close().await?;
    drop(dir);
    Ok(())
}

#[tokio::test]
async fn test_quota_rejects_oversized_writes() -> anyhow::Result<()> {
    let (storage, _dir) = create_test_storage().await?;
    let storage = storage.with_quota(32);

    storage.set_item("a", "0123456789").await?;
    let err = storage.set_item("b", &"x".repeat(30)).await.unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { limit: 32, .. }));
    assert_eq!(storage.get_item("b").await?, None);

    // Replacing a value only counts the new one.
    storage.set_item("a", &"y".repeat(31)).await?;
    storage.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_store_over_sqlite() -> anyhow::Result<()> {
    let (storage, _dir) = create_test_storage().await?;
    let path = storage.path().to_path_buf();

    let mut store = Store::open(storage, TEST_KEY).await;
    assert!(store.database().is_empty());
    store
        .database_mut()
        .add_report(ReportKind::Monthly, time::macros::datetime!(2026-10-18 10:00 UTC));
    store.save().await?;
    store.storage().close().await?;

    let store = Store::open(SqliteStorage::open(&path).await?, TEST_KEY).await;
    assert_eq!(store.database().reports()[0].title, "Reporte Mensual Octubre 2026");
    store.storage().close().await?;
    Ok(())
}
