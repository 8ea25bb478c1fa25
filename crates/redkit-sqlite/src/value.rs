//! Owned SQL values crossing the wrapper boundary.

use redkit_core::error::{RedkitError, Result};
use serde::{Deserialize, Serialize};

/// A bind value or result cell.
///
/// Mirrors SQLite's storage classes. Deserializes untagged from JSON
/// scalars, which is what the host framework's request bags carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float
    Real(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Blob(Vec<u8>),
}

impl From<SqlValue> for rusqlite::types::Value {
    fn from(value: SqlValue) -> Self {
        match value {
            SqlValue::Null => Self::Null,
            SqlValue::Integer(i) => Self::Integer(i),
            SqlValue::Real(r) => Self::Real(r),
            SqlValue::Text(t) => Self::Text(t),
            SqlValue::Blob(b) => Self::Blob(b),
        }
    }
}

impl From<rusqlite::types::Value> for SqlValue {
    fn from(value: rusqlite::types::Value) -> Self {
        match value {
            rusqlite::types::Value::Null => Self::Null,
            rusqlite::types::Value::Integer(i) => Self::Integer(i),
            rusqlite::types::Value::Real(r) => Self::Real(r),
            rusqlite::types::Value::Text(t) => Self::Text(t),
            rusqlite::types::Value::Blob(b) => Self::Blob(b),
        }
    }
}

impl SqlValue {
    /// Renders the value as a SQL literal.
    ///
    /// Only used for PRAGMA argument expansion; regular statements bind
    /// positionally through the driver.
    pub(crate) fn to_sql_literal(&self) -> Result<String> {
        match self {
            Self::Null => Ok("NULL".to_string()),
            Self::Integer(i) => Ok(i.to_string()),
            Self::Real(r) => Ok(r.to_string()),
            Self::Text(t) => Ok(format!("'{}'", t.replace('\'', "''"))),
            Self::Blob(_) => Err(RedkitError::database(
                "blob values cannot be used as PRAGMA arguments",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_scalars_deserialize() {
        let values: Vec<SqlValue> =
            serde_json::from_str(r#"[null, 42, 1.5, "ON"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                SqlValue::Null,
                SqlValue::Integer(42),
                SqlValue::Real(1.5),
                SqlValue::Text("ON".into()),
            ]
        );
    }

    #[test]
    fn driver_value_round_trip() {
        let original = SqlValue::Text("Active".into());
        let driver: rusqlite::types::Value = original.clone().into();
        assert_eq!(SqlValue::from(driver), original);
    }

    #[test]
    fn sql_literal_escapes_quotes() {
        assert_eq!(
            SqlValue::Text("O'Neil".into()).to_sql_literal().unwrap(),
            "'O''Neil'"
        );
        assert_eq!(SqlValue::Integer(7).to_sql_literal().unwrap(), "7");
        assert_eq!(SqlValue::Null.to_sql_literal().unwrap(), "NULL");
        assert!(SqlValue::Blob(vec![1, 2]).to_sql_literal().is_err());
    }
}
