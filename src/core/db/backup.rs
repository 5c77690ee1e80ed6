use std::{
    fs::{self, File},
    io::Read,
    path::Path,
};

use anyhow::Context;
use tar::{Archive, Builder, Header};
use zstd::stream::{read::Decoder as ZstdDecoder, write::Encoder as ZstdEncoder};

/// Name of the snapshot entry inside a backup archive.
pub const SNAPSHOT_ENTRY: &str = "snapshot.json";

/// Write `snapshot` into a zstd-compressed tar archive at `path`.
pub fn write_backup<P: AsRef<Path>>(path: P, snapshot: &str) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let out = File::create(path).with_context(|| format!("Failed to create backup {:?}", path))?;
    let encoder = ZstdEncoder::new(out, 3)
        .with_context(|| format!("Failed to create zstd encoder for {:?}", path))?;
    let mut tar = Builder::new(encoder);

    let mut header = Header::new_gnu();
    header.set_size(snapshot.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(
        time::OffsetDateTime::now_utc()
            .unix_timestamp()
            .max(0) as u64,
    );
    header.set_cksum();
    tar.append_data(&mut header, SNAPSHOT_ENTRY, snapshot.as_bytes())
        .with_context(|| format!("Failed to add snapshot to {:?}", path))?;

    // Finish tar, then finish zstd stream
    let encoder = tar
        .into_inner()
        .with_context(|| format!("Failed to finalize tar for {:?}", path))?;
    encoder
        .finish()
        .with_context(|| format!("Failed to finalize zstd stream for {:?}", path))?;
    Ok(())
}

/// Read the snapshot text back out of a backup archive.
pub fn read_backup<P: AsRef<Path>>(path: P) -> anyhow::Result<String> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("Failed to open backup {:?}", path))?;
    let decoder =
        ZstdDecoder::new(f).with_context(|| format!("Invalid zstd stream in {:?}", path))?;
    let mut archive = Archive::new(decoder);

    for entry in archive
        .entries()
        .with_context(|| format!("Failed to read archive {:?}", path))?
    {
        let mut entry = entry?;
        if entry.path()? == Path::new(SNAPSHOT_ENTRY) {
            let mut snapshot = String::new();
            entry
                .read_to_string(&mut snapshot)
                .with_context(|| format!("Snapshot in {:?} is not UTF-8", path))?;
            return Ok(snapshot);
        }
    }
    anyhow::bail!("Backup {:?} has no {} entry", path, SNAPSHOT_ENTRY)
}
