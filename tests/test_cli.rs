use std::{path::Path, process::Command};

fn megaprop(data: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new(env!("CARGO_BIN_EXE_megaprop"))
        .arg("--data")
        .arg(data)
        .args(args)
        .env_remove("MEGAPROP_STORAGE_KEY")
        .output()?;
    anyhow::ensure!(
        output.status.success(),
        "megaprop {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?)
}

#[tokio::test]
async fn test_new_tenant_is_listed() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let data = dir.path().join("megaprop.db");

    let out = megaprop(
        &data,
        &[
            "new",
            "tenant",
            "-f",
            "nombre=Juan",
            "-f",
            "apellidoPaterno=Pérez",
            "-f",
            "telefono=5551234",
            "-f",
            "email=juan@x.com",
        ],
    )?;
    assert!(out.contains("Inquilino"), "unexpected output: {out}");

    let listed: serde_json::Value = serde_json::from_str(&megaprop(&data, &["list", "tenants"])?)?;
    assert_eq!(listed[0]["name"], "Juan Pérez");
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_bad_field_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let data = dir.path().join("megaprop.db");

    assert!(megaprop(&data, &["new", "tenant", "-f", "color=azul"]).is_err());
    let listed = megaprop(&data, &["list", "tenants"])?;
    assert_eq!(listed.trim(), "[]");
    Ok(())
}
