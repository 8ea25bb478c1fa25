//! Credential acquisition, separated from connection establishment.
//!
//! Connection factories never prompt inline. They take a [`CredentialSource`]
//! and ask it for a password only when the configuration leaves one out, so
//! non-interactive callers can inject a secret and interactive callers get
//! the masked terminal prompt.

use crate::error::{RedkitError, Result};

/// Supplies a password on demand.
pub trait CredentialSource {
    /// Returns the password, prompting or fetching as the implementation
    /// sees fit.
    fn password(&self, prompt: &str) -> Result<String>;
}

/// A pre-supplied secret for non-interactive use.
#[derive(Debug, Clone)]
pub struct StaticCredential {
    secret: String,
}

impl StaticCredential {
    /// Wraps an already-acquired secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialSource for StaticCredential {
    fn password(&self, _prompt: &str) -> Result<String> {
        Ok(self.secret.clone())
    }
}

/// Masked terminal prompt.
#[derive(Debug, Clone, Default)]
pub struct PromptCredential;

impl CredentialSource for PromptCredential {
    fn password(&self, prompt: &str) -> Result<String> {
        rpassword::prompt_password(prompt)
            .map_err(|e| RedkitError::credential(format!("masked prompt failed: {e}")))
    }
}
