//! End-to-end exercises of the plugin wrappers through their public
//! surfaces, driven the way the host framework drives them: request bags in,
//! raw results out.

use redkit_core::error::{HandleError, RedkitError};
use redkit_sqlite::{connect, disconnect, run_request, DatabaseConfig, SqlValue};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn sqlite_session_full_lifecycle() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("lifecycle.db");

    let mut session = connect(&DatabaseConfig {
        dir_path: db_path.clone(),
    })
    .unwrap();

    // FK pragma through the documented parameterized convention: no error,
    // empty ack result.
    let rows = run_request(
        &session,
        json!({
            "statement": "PRAGMA foreign_keys = ?",
            "statement_params": ["ON"],
        }),
    )
    .unwrap();
    assert!(rows.is_empty());

    run_request(
        &session,
        json!({ "statement": "CREATE TABLE hosts (addr TEXT, tagged INTEGER)" }),
    )
    .unwrap();
    run_request(
        &session,
        json!({
            "statement": "INSERT INTO hosts (addr, tagged) VALUES (?, ?)",
            "statement_params": ["10.0.0.5", 1],
        }),
    )
    .unwrap();
    run_request(
        &session,
        json!({
            "statement": "INSERT INTO hosts (addr, tagged) VALUES (?, ?)",
            "statement_params": ["10.0.0.9", 0],
        }),
    )
    .unwrap();

    let rows = run_request(
        &session,
        json!({
            "statement": "SELECT addr FROM hosts WHERE tagged = ?",
            "statement_params": [1],
        }),
    )
    .unwrap();
    assert_eq!(rows, vec![vec![SqlValue::Text("10.0.0.5".into())]]);

    disconnect(&mut session).unwrap();
    assert!(db_path.exists());

    // The handle no longer accepts work after disposal.
    let err = run_request(&session, json!({ "statement": "SELECT 1" })).unwrap_err();
    assert!(matches!(
        err,
        RedkitError::Handle(HandleError::Disposed { .. })
    ));
}

#[test]
fn malformed_param_shape_never_reaches_the_database() {
    let dir = TempDir::new().unwrap();
    let session = connect(&DatabaseConfig {
        dir_path: dir.path().join("shape.db"),
    })
    .unwrap();

    let err = run_request(
        &session,
        json!({
            "statement": "CREATE TABLE should_not_exist (id INTEGER)",
            "statement_params": { "id": 1 },
        }),
    )
    .unwrap_err();
    assert!(matches!(err, RedkitError::ParamShape { .. }));

    // The shape failure happened before execution: the table was never
    // created.
    let rows = run_request(
        &session,
        json!({
            "statement": "SELECT name FROM sqlite_master WHERE name = ?",
            "statement_params": ["should_not_exist"],
        }),
    )
    .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn ssn_batch_is_well_formed() {
    let values = redkit_ssn::generate(64);
    assert_eq!(values.len(), 64);
    for value in values {
        let groups: Vec<&str> = value.split('-').collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(groups[2].len(), 4);
    }
}
