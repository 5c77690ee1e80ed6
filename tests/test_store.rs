mod common;
use common::*;

use megaprop::core::db::{SCHEMA_VERSION, SnapshotError};

#[tokio::test]
async fn test_snapshot_round_trips_through_storage() -> anyhow::Result<()> {
    let (mut app, storage) = create_test_app().await;
    add_property(&mut app, "9800.5").await;
    submit_form(&mut app, FormKind::Tenant, &JUAN).await;

    let raw = storage.get_item(TEST_KEY).await?.expect("snapshot written");
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(json["version"], SCHEMA_VERSION);
    assert_eq!(json["database"]["properties"][0]["rent"], 9800.5);
    assert_eq!(json["database"]["tenants"][0]["name"], "Juan Pérez");

    let store = Store::open(storage.clone(), TEST_KEY).await;
    assert_eq!(store.database(), app.store().database());

    // Another key sees nothing.
    let other = Store::open(storage, "otherKey").await;
    assert!(other.database().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_absent_or_corrupt_data_starts_empty() -> anyhow::Result<()> {
    let storage = MemoryStorage::new();
    let store = Store::open(storage.clone(), TEST_KEY).await;
    assert_eq!(store.database(), &Database::default());

    for raw in ["{not json", "[1, 2, 3]", r#"{"version": 99, "database": {}}"#] {
        storage.set_item(TEST_KEY, raw).await?;
        let store = Store::open(storage.clone(), TEST_KEY).await;
        assert!(store.database().is_empty(), "{raw}");
    }

    // The unreadable value is left alone until the next save.
    assert_eq!(
        storage.get_item(TEST_KEY).await?.as_deref(),
        Some(r#"{"version": 99, "database": {}}"#)
    );
    Ok(())
}

#[tokio::test]
async fn test_legacy_snapshot_is_migrated_on_load() -> anyhow::Result<()> {
    let storage = MemoryStorage::new();
    let legacy = r#"{
        "properties": [{
            "codigo": "P-01", "tipo": "casa", "calle": "Olivos", "numExt": "25",
            "colonia": "Lomas", "cp": "11000", "delegacion": "Miguel Hidalgo",
            "ciudad": "CDMX", "estado": "CDMX", "renta": "18000",
            "id": "PROP1", "status": "available", "createdAt": "2024-10-27T03:33:20.000Z"
        }],
        "tenants": [], "contracts": [], "payments": [], "maintenance": [],
        "documents": [], "reports": [], "notifications": []
    }"#;
    storage.set_item(TEST_KEY, legacy).await?;

    let mut app = open_app(storage.clone()).await;
    let db = app.store().database();
    assert_eq!(db.properties().len(), 1);
    assert_eq!(db.properties()[0].rent, 18000.0);
    assert_eq!(db.properties()[0].status, PropertyStatus::Available);

    // The first save writes the current layout.
    submit_form(&mut app, FormKind::Tenant, &JUAN).await;
    let raw = storage.get_item(TEST_KEY).await?.expect("snapshot written");
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(json["version"], SCHEMA_VERSION);
    assert_eq!(json["database"]["properties"][0]["id"], "PROP1");
    Ok(())
}

#[tokio::test]
async fn test_failed_write_keeps_record_and_reports_error() -> anyhow::Result<()> {
    let storage = MemoryStorage::with_quota(64);
    let mut app = open_app(storage.clone()).await;

    let toast = submit_form(&mut app, FormKind::Tenant, &JUAN).await.expect("a toast");
    assert_eq!(toast.message, "Error al guardar los datos");
    assert_eq!(toast.level, ToastLevel::Error);

    assert_eq!(app.store().database().tenants().len(), 1);
    assert!(app.state().modals.is_empty());
    assert_eq!(app.current_view(), View::Tenants);
    assert!(storage.is_empty().await);

    // Once there is room the next save carries everything.
    storage.set_quota(None).await;
    submit_form(&mut app, FormKind::Tenant, &JUAN).await;
    let reopened = open_app(storage).await;
    assert_eq!(reopened.store().database().tenants().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_import_replaces_database() -> anyhow::Result<()> {
    let (mut source, _storage) = create_test_app().await;
    add_property(&mut source, "12500").await;
    let exported = source.store().export_json()?;

    let (mut target, storage) = create_test_app().await;
    submit_form(&mut target, FormKind::Tenant, &JUAN).await;

    let decoded = target.store_mut().import_json(&exported)?;
    assert_eq!(decoded.migrated_from, None);
    target.store().save().await?;

    let reopened = open_app(storage).await;
    assert_eq!(reopened.store().database().properties().len(), 1);
    assert!(reopened.store().database().tenants().is_empty());

    let err = target.store_mut().import_json(r#"{"theme": "dark"}"#).unwrap_err();
    assert!(matches!(err, SnapshotError::Incompatible(_)));
    assert_eq!(target.store().database().properties().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_export_is_stamped_by_the_app_clock() -> anyhow::Result<()> {
    let (mut app, storage) = create_test_app().await;
    submit_form(&mut app, FormKind::Tenant, &JUAN).await;

    let exported = app.store().export_json()?;
    let json: serde_json::Value = serde_json::from_str(&exported)?;
    assert_eq!(json["savedAt"], "2026-10-18T10:00:00Z");
    assert_eq!(app.store().export_json()?, exported);

    // The saved snapshot carries the same stamp.
    let raw = storage.get_item(TEST_KEY).await?.expect("snapshot written");
    assert_eq!(raw, exported);
    Ok(())
}
