use thermalya::db::run_migrations;
use thermalya::repository::{ClientReader, EmployeeReader};

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
    let path = test_db.path().to_path_buf();
    {
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
    }
    assert!(path.exists());

    let repo = test_db.repo();
    assert!(repo.list_clients().unwrap().is_empty());
    assert!(repo.list_employees().unwrap().is_empty());

    drop(repo);
    drop(test_db);
    assert!(!path.exists());
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations_are_idempotent.db");
    assert_eq!(run_migrations(&test_db.pool()).unwrap(), 0);
}
