mod common;
use common::*;

use megaprop::core::db::{read_backup, write_backup};

#[tokio::test]
async fn test_backup_restores_into_fresh_store() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("megaprop.tar.zst");

    let (mut app, _storage) = create_test_app().await;
    add_property(&mut app, "12500").await;
    submit_form(&mut app, FormKind::Tenant, &JUAN).await;
    write_backup(&path, &app.store().export_json()?)?;

    let (mut restored, storage) = create_test_app().await;
    let raw = read_backup(&path)?;
    let decoded = restored.store_mut().import_json(&raw)?;
    assert_eq!(decoded.dropped, 0);
    restored.store().save().await?;

    assert_eq!(restored.store().database(), app.store().database());
    let reopened = open_app(storage).await;
    assert_eq!(reopened.store().database().tenants()[0].name, "Juan Pérez");
    Ok(())
}

#[tokio::test]
async fn test_archive_without_snapshot_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("empty.tar.zst");
    let file = std::fs::File::create(&path)?;
    let encoder = zstd::stream::write::Encoder::new(file, 3)?;
    let tar = tar::Builder::new(encoder);
    tar.into_inner()?.finish()?;

    let err = read_backup(&path).unwrap_err();
    assert!(err.to_string().contains("snapshot.json"));
    Ok(())
}
