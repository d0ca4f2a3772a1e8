//! Snapshot export/import and reset. Import and reset replace the whole
//! collection and cannot be undone.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Transaction;
use crate::store::Store;

/// Default file name offered for exports.
pub(crate) const EXPORT_FILE_NAME: &str = "transactions.json";

pub(crate) fn export_snapshot(store: &Store) -> Result<Vec<u8>> {
    Ok(store.to_json()?.into_bytes())
}

/// Write the snapshot to `path`, returning the number of records written.
pub(crate) fn export_to_file(store: &Store, path: &Path) -> Result<usize> {
    let bytes = export_snapshot(store)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    tracing::info!(count = store.len(), path = %path.display(), "exported snapshot");
    Ok(store.len())
}

fn parse_snapshot(bytes: &[u8]) -> Result<Vec<Transaction>> {
    serde_json::from_slice(bytes).context("Snapshot is not a valid transaction list")
}

/// Replace the store's contents with the snapshot in `bytes`.
///
/// Records are taken as they are; only the JSON shape is checked. On a parse
/// failure the store is left untouched. Returns the number of records imported.
pub(crate) fn import_snapshot(store: &mut Store, bytes: &[u8]) -> Result<usize> {
    let txns = parse_snapshot(bytes)?;
    let count = txns.len();
    let mut ids: Vec<i64> = txns.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != count {
        tracing::warn!(count, unique = ids.len(), "imported snapshot contains duplicate ids");
    }
    store.replace_all(txns)?;
    tracing::info!(count, "imported snapshot");
    Ok(count)
}

pub(crate) fn import_from_file(store: &mut Store, path: &Path) -> Result<usize> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read import file: {}", path.display()))?;
    import_snapshot(store, &bytes)
}

pub(crate) fn reset_all(store: &mut Store) -> Result<()> {
    let removed = store.len();
    store.replace_all(Vec::new())?;
    tracing::info!(removed, "reset all transactions");
    Ok(())
}
