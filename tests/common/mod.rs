#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thermalya::db::{DbPool, establish_connection_pool, run_migrations};
use thermalya::repository::DieselRepository;

/// Migrated SQLite file living in a temporary directory.
///
/// The directory, and with it the database, is removed on drop.
pub struct TestDb {
    pool: DbPool,
    path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path").to_string();

        let pool = establish_connection_pool(&url).expect("open test database");
        run_migrations(&pool).expect("run migrations");

        Self {
            pool,
            path,
            _dir: dir,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}
