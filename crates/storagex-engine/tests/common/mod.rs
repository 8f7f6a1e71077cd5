// Shared setup for report integration tests
#![allow(dead_code)]

use rusqlite::Connection;
use std::path::PathBuf;
use storagex_store::DataSource;
use tempfile::TempDir;

pub const SCHEMA: &str = include_str!("../../../storagex-store/tests/fixtures/schema.sql");
pub const SEED: &str = include_str!("../../../storagex-store/tests/fixtures/seed.sql");

pub struct TestDb {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestDb {
    pub fn data_source(&self) -> DataSource {
        DataSource::new(self.path.display().to_string())
    }

    pub fn raw(&self) -> Connection {
        Connection::open(&self.path).unwrap()
    }
}

pub fn setup_test_db() -> TestDb {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(SEED).unwrap();
    TestDb { _dir: dir, path }
}
