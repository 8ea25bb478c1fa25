//! JSON request-bag boundary for the statement executor.
//!
//! The host framework drives plugins with sparse named-parameter bags. The
//! bag is deserialized into an explicit request structure before anything
//! touches the database; a bind-value list that is not a JSON array fails
//! the shape check up front and no execution occurs.

use redkit_core::error::{ConfigError, RedkitError, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::dao::{sql_statement, SqliteSession};
use crate::value::SqlValue;

/// A single statement-execution request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlRequest {
    /// SQL text, with positional `?` markers when parameterized
    pub statement: String,

    /// Ordered bind values; absent for non-parameterized execution
    #[serde(default)]
    pub statement_params: Option<Vec<SqlValue>>,
}

/// Parses a request bag, enforcing the bind-list shape check.
pub fn parse_request(bag: Value) -> Result<SqlRequest> {
    if let Some(params) = bag.get("statement_params") {
        if !params.is_array() && !params.is_null() {
            return Err(RedkitError::param_shape(json_type_name(params)));
        }
    }

    serde_json::from_value(bag)
        .map_err(|e| ConfigError::invalid_value("request", e.to_string()).into())
}

/// Parses and executes a request bag against an open session.
pub fn run_request(session: &SqliteSession, bag: Value) -> Result<Vec<Vec<SqlValue>>> {
    let request = parse_request(bag)?;
    sql_statement(
        session,
        &request.statement,
        request.statement_params.as_deref(),
    )
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
