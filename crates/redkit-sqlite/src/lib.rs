//! RedKit SQLite access object.
//!
//! A prepared-statement executor over [`rusqlite`]. The wrapper validates
//! the session handle and the bind-value shape, runs exactly one delegated
//! statement per call, and returns the raw row set untouched. Foreign-key
//! support is enabled on every new connection.
//!
//! ```no_run
//! use redkit_sqlite::{connect, disconnect, sql_statement, DatabaseConfig, SqlValue};
//!
//! # fn run() -> redkit_core::Result<()> {
//! let mut session = connect(&DatabaseConfig {
//!     dir_path: "/tmp/inventory.db".into(),
//! })?;
//!
//! let rows = sql_statement(
//!     &session,
//!     "SELECT * FROM tn_users WHERE state = ?",
//!     Some(&[SqlValue::Text("Active".into())]),
//! )?;
//!
//! disconnect(&mut session)?;
//! # Ok(())
//! # }
//! ```

pub mod dao;
pub mod request;
pub mod value;

pub use dao::{connect, disconnect, sql_statement, DatabaseConfig, SqliteDao, SqliteSession};
pub use request::{parse_request, run_request, SqlRequest};
pub use value::SqlValue;
