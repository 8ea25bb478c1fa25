//! Error types shared by all RedKit plugin wrappers.
//!
//! Every wrapper returns `Result<T, RedkitError>` for every fallible call.
//! Delegated-library failures are wrapped with the integration they came
//! from; nothing is swallowed into a success value and nothing panics.

use thiserror::Error;

/// Result type alias using RedkitError as the error type.
pub type Result<T> = std::result::Result<T, RedkitError>;

/// Top-level error type for all RedKit operations.
#[derive(Debug, Error)]
pub enum RedkitError {
    /// Configuration validation errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session handle errors
    #[error("Handle error: {0}")]
    Handle(#[from] HandleError),

    /// Delegated directory (LDAP) call failed
    #[error("Directory error: {reason}")]
    Directory { reason: String },

    /// Delegated database (SQLite) call failed
    #[error("Database error: {reason}")]
    Database { reason: String },

    /// Delegated page lookup failed
    #[error("Lookup error: {reason}")]
    Lookup { reason: String },

    /// Statement bind values were not supplied as an ordered sequence
    #[error("Statement params must be an ordered sequence, got {got}")]
    ParamShape { got: String },

    /// Credential acquisition failed
    #[error("Credential error: {reason}")]
    Credential { reason: String },
}

impl RedkitError {
    /// Creates a directory error from a delegated failure description.
    pub fn directory(reason: impl Into<String>) -> Self {
        Self::Directory {
            reason: reason.into(),
        }
    }

    /// Creates a database error from a delegated failure description.
    pub fn database(reason: impl Into<String>) -> Self {
        Self::Database {
            reason: reason.into(),
        }
    }

    /// Creates a lookup error from a delegated failure description.
    pub fn lookup(reason: impl Into<String>) -> Self {
        Self::Lookup {
            reason: reason.into(),
        }
    }

    /// Creates a parameter-shape error naming the offending value type.
    pub fn param_shape(got: impl Into<String>) -> Self {
        Self::ParamShape { got: got.into() }
    }

    /// Creates a credential acquisition error.
    pub fn credential(reason: impl Into<String>) -> Self {
        Self::Credential {
            reason: reason.into(),
        }
    }
}

/// Errors raised while validating an integration's configuration structure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was absent or empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A field was present but unusable
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by session-handle validation before any delegated call.
///
/// Handles are typed per integration, so passing the wrong kind of handle to
/// an operation is unrepresentable; the remaining runtime check is whether
/// the handle still owns a live session.
#[derive(Debug, Error)]
pub enum HandleError {
    /// The session behind this handle was already disposed
    #[error("Invalid {plugin} handle: session already disposed")]
    Disposed { plugin: &'static str },
}
