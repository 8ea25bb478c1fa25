//! SQLite session lifecycle and the prepared-statement executor.

use std::path::{Path, PathBuf};

use redkit_core::error::{ConfigError, HandleError, RedkitError, Result};
use redkit_core::plugin::PluginInfo;
use rusqlite::{params_from_iter, Connection};
use tracing::debug;

use crate::value::SqlValue;

/// Marker type carrying the plugin's self-description.
pub struct SqliteDao;

impl PluginInfo for SqliteDao {
    const NAME: &'static str = "dao-sqlite";

    fn usage() -> &'static str {
        "USAGE:
  let session = redkit_sqlite::connect(&DatabaseConfig {
      dir_path: 'required - path of SQLite3 DB file',
  })?;

  let rows = redkit_sqlite::sql_statement(
      &session,
      'SELECT * FROM tn_users WHERE state = ?',
      Some(&[SqlValue::Text('Active')]),
  )?;

  redkit_sqlite::disconnect(&mut session)?;
"
    }
}

/// Configuration for opening a database session.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DatabaseConfig {
    /// Filesystem path of the database file
    pub dir_path: PathBuf,
}

impl DatabaseConfig {
    /// Validates presence of the required fields.
    pub fn validate(&self) -> Result<()> {
        if self.dir_path.as_os_str().is_empty() {
            return Err(ConfigError::missing_field("dir_path").into());
        }
        Ok(())
    }
}

/// An open database session.
///
/// Owns the underlying `rusqlite` connection; disposal takes it out, and any
/// later operation fails with a handle error before a delegated call is
/// attempted.
#[derive(Debug)]
pub struct SqliteSession {
    conn: Option<Connection>,
    path: PathBuf,
}

impl SqliteSession {
    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            HandleError::Disposed {
                plugin: SqliteDao::NAME,
            }
            .into()
        })
    }
}

/// Opens the database file and enables foreign-key support.
///
/// The FK pragma runs through the same statement executor the caller will
/// use, with the documented `PRAGMA foreign_keys = ?` convention.
pub fn connect(config: &DatabaseConfig) -> Result<SqliteSession> {
    config.validate()?;

    let conn = Connection::open(&config.dir_path).map_err(|e| {
        RedkitError::database(format!("open {} failed: {e}", config.dir_path.display()))
    })?;

    let session = SqliteSession {
        conn: Some(conn),
        path: config.dir_path.clone(),
    };

    sql_statement(
        &session,
        "PRAGMA foreign_keys = ?",
        Some(&[SqlValue::Text("ON".into())]),
    )?;

    debug!(path = %session.path.display(), "database session opened");

    Ok(session)
}

/// Executes exactly one statement and returns the raw row set.
///
/// Binds positionally when a value list is given. Rows come back as
/// column-ordered vectors of [`SqlValue`]; statements that produce no rows
/// yield an empty vec.
pub fn sql_statement(
    session: &SqliteSession,
    statement: &str,
    params: Option<&[SqlValue]>,
) -> Result<Vec<Vec<SqlValue>>> {
    let conn = session.conn()?;

    // SQLite refuses bind markers inside PRAGMA statements, so the
    // documented `PRAGMA x = ?` convention is honored by validated literal
    // substitution instead of driver binding.
    let expanded;
    let (statement, params) = if let (true, Some(values)) = (is_pragma(statement), params) {
        expanded = expand_pragma(statement, values)?;
        (expanded.as_str(), None)
    } else {
        (statement, params)
    };

    let mut stmt = conn
        .prepare(statement)
        .map_err(|e| RedkitError::database(format!("prepare failed: {e}")))?;
    let column_count = stmt.column_count();

    let mut rows = match params {
        Some(values) => stmt
            .query(params_from_iter(
                values.iter().cloned().map(rusqlite::types::Value::from),
            ))
            .map_err(|e| RedkitError::database(format!("execute failed: {e}")))?,
        None => stmt
            .query([])
            .map_err(|e| RedkitError::database(format!("execute failed: {e}")))?,
    };

    let mut result = Vec::new();
    while let Some(row) = rows
        .next()
        .map_err(|e| RedkitError::database(format!("row fetch failed: {e}")))?
    {
        let mut columns = Vec::with_capacity(column_count);
        for index in 0..column_count {
            let value: rusqlite::types::Value = row
                .get(index)
                .map_err(|e| RedkitError::database(format!("column read failed: {e}")))?;
            columns.push(SqlValue::from(value));
        }
        result.push(columns);
    }

    Ok(result)
}

/// Closes the session's connection.
///
/// Re-validates the handle first; disposing twice is an invalid-handle
/// error. Close failures are propagated, not swallowed.
pub fn disconnect(session: &mut SqliteSession) -> Result<()> {
    let path = session.path.clone();
    match session.conn.take() {
        Some(conn) => conn
            .close()
            .map_err(|(_, e)| RedkitError::database(format!("close {} failed: {e}", path.display()))),
        None => Err(HandleError::Disposed {
            plugin: SqliteDao::NAME,
        }
        .into()),
    }
}

fn is_pragma(statement: &str) -> bool {
    statement
        .trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("pragma"))
}

fn expand_pragma(statement: &str, params: &[SqlValue]) -> Result<String> {
    let mut out = String::with_capacity(statement.len());
    let mut values = params.iter();
    for ch in statement.chars() {
        if ch == '?' {
            let value = values.next().ok_or_else(|| {
                RedkitError::database("PRAGMA has more bind markers than params")
            })?;
            out.push_str(&value.to_sql_literal()?);
        } else {
            out.push(ch);
        }
    }
    if values.next().is_some() {
        return Err(RedkitError::database(
            "PRAGMA has more params than bind markers",
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_session(dir: &TempDir) -> SqliteSession {
        connect(&DatabaseConfig {
            dir_path: dir.path().join("test.db"),
        })
        .unwrap()
    }

    #[test]
    fn connect_enables_foreign_keys() {
        let dir = TempDir::new().unwrap();
        let session = open_session(&dir);

        let rows = sql_statement(&session, "PRAGMA foreign_keys", None).unwrap();
        assert_eq!(rows, vec![vec![SqlValue::Integer(1)]]);
    }

    #[test]
    fn pragma_with_params_executes_without_error() {
        let dir = TempDir::new().unwrap();
        let session = open_session(&dir);

        let rows = sql_statement(
            &session,
            "PRAGMA foreign_keys = ?",
            Some(&[SqlValue::Text("ON".into())]),
        )
        .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn parameterized_select_matches_only_bound_value() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);

        sql_statement(
            &session,
            "CREATE TABLE tn_users (name TEXT, state TEXT)",
            None,
        )
        .unwrap();
        sql_statement(
            &session,
            "INSERT INTO tn_users (name, state) VALUES (?, ?)",
            Some(&[
                SqlValue::Text("jane".into()),
                SqlValue::Text("Active".into()),
            ]),
        )
        .unwrap();
        sql_statement(
            &session,
            "INSERT INTO tn_users (name, state) VALUES (?, ?)",
            Some(&[
                SqlValue::Text("john".into()),
                SqlValue::Text("Disabled".into()),
            ]),
        )
        .unwrap();

        let rows = sql_statement(
            &session,
            "SELECT name FROM tn_users WHERE state = ?",
            Some(&[SqlValue::Text("Active".into())]),
        )
        .unwrap();
        assert_eq!(rows, vec![vec![SqlValue::Text("jane".into())]]);

        disconnect(&mut session).unwrap();
    }

    #[test]
    fn operation_after_disposal_is_invalid_handle() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);

        disconnect(&mut session).unwrap();
        let err = sql_statement(&session, "SELECT 1", None).unwrap_err();
        assert!(matches!(
            err,
            RedkitError::Handle(HandleError::Disposed {
                plugin: "dao-sqlite"
            })
        ));
    }

    #[test]
    fn double_disposal_is_invalid_handle() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);

        disconnect(&mut session).unwrap();
        assert!(matches!(
            disconnect(&mut session).unwrap_err(),
            RedkitError::Handle(HandleError::Disposed { .. })
        ));
    }

    #[test]
    fn pragma_expansion_checks_arity() {
        assert!(expand_pragma("PRAGMA x = ?", &[]).is_err());
        assert!(expand_pragma(
            "PRAGMA x",
            &[SqlValue::Text("ON".into())]
        )
        .is_err());
        assert_eq!(
            expand_pragma("PRAGMA x = ?", &[SqlValue::Text("ON".into())]).unwrap(),
            "PRAGMA x = 'ON'"
        );
    }

    #[test]
    fn pragma_detection_is_case_insensitive() {
        assert!(is_pragma("  pragma foreign_keys = ?"));
        assert!(is_pragma("PRAGMA user_version"));
        assert!(!is_pragma("SELECT 'pragma'"));
    }

    #[test]
    fn session_is_debug_formattable() {
        let dir = TempDir::new().unwrap();
        let session = open_session(&dir);
        assert!(format!("{session:?}").contains("SqliteSession"));
    }

    #[test]
    fn empty_dir_path_is_rejected() {
        let err = connect(&DatabaseConfig {
            dir_path: PathBuf::new(),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            RedkitError::Config(ConfigError::MissingField { .. })
        ));
    }
}
