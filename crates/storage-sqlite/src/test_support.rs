use std::sync::Arc;

use tempfile::TempDir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

/// A migrated database in a temporary directory with its writer actor.
pub struct TestDb {
    _dir: TempDir,
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("test.db");
    let db_path = init(db_path.to_str().expect("utf-8 temp path")).expect("init db");
    let pool = create_pool(&db_path).expect("create pool");
    run_migrations(&pool).expect("run migrations");
    let writer = spawn_writer((*pool).clone());
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}
