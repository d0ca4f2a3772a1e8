#![allow(clippy::unwrap_used)]

use super::*;

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_records_version() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_migrate_is_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.write_blob("transactions", "[]").unwrap();
    db.migrate().unwrap();
    let rows: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(db.read_blob("transactions").unwrap().as_deref(), Some("[]"));
}

// ── Blobs ─────────────────────────────────────────────────────

#[test]
fn test_missing_blob_is_none() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.read_blob("transactions").unwrap().is_none());
}

#[test]
fn test_write_then_read_blob() {
    let db = Database::open_in_memory().unwrap();
    db.write_blob("transactions", r#"[{"id":1}]"#).unwrap();
    assert_eq!(
        db.read_blob("transactions").unwrap().as_deref(),
        Some(r#"[{"id":1}]"#)
    );
}

#[test]
fn test_write_blob_overwrites() {
    let db = Database::open_in_memory().unwrap();
    db.write_blob("transactions", "[1]").unwrap();
    db.write_blob("transactions", "[2]").unwrap();
    assert_eq!(db.read_blob("transactions").unwrap().as_deref(), Some("[2]"));

    let count: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM blobs", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_blobs_are_independent() {
    let db = Database::open_in_memory().unwrap();
    db.write_blob("a", "1").unwrap();
    db.write_blob("b", "2").unwrap();
    assert_eq!(db.read_blob("a").unwrap().as_deref(), Some("1"));
    assert_eq!(db.read_blob("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pocketbook.db");
    {
        let db = Database::open(&path).unwrap();
        db.write_blob("transactions", "[]").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.read_blob("transactions").unwrap().as_deref(), Some("[]"));
}
