//! Directory connection configuration.

use redkit_core::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Default LDAPS port.
pub const DEFAULT_PORT: u16 = 636;

/// Transport protection for the directory connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encryption {
    /// TLS from the first byte (ldaps://)
    SimpleTls,
    /// Plaintext connect upgraded in-band via StartTLS
    StartTls,
}

/// Bind method used to authenticate against the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Simple bind with DN and password
    Simple,
    /// SASL EXTERNAL bind
    Sasl,
    /// GSS-SPNEGO (Kerberos) bind
    GssSpnego,
}

/// Configuration for establishing a directory session.
///
/// Required fields are non-optional; optional fields carry serde defaults.
/// `password` may be left out, in which case the connection factory asks its
/// injected credential source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Target server hostname or IP
    pub host: String,

    /// Target server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base DN searches are scoped from (e.g. `dc=example,dc=com`)
    pub base: String,

    /// Transport protection; plaintext when absent
    #[serde(default)]
    pub encryption: Option<Encryption>,

    /// Bind method
    pub auth_method: AuthMethod,

    /// Bind username / DN
    pub username: String,

    /// Bind password; elicited from the credential source when absent
    #[serde(default)]
    pub password: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl DirectoryConfig {
    /// Validates presence of the required fields.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ConfigError::missing_field("host").into());
        }
        if self.base.is_empty() {
            return Err(ConfigError::missing_field("base").into());
        }
        if self.username.is_empty() {
            return Err(ConfigError::missing_field("username").into());
        }
        if self.port == 0 {
            return Err(ConfigError::invalid_value("port", "must be non-zero").into());
        }
        Ok(())
    }

    /// LDAP URL for this configuration.
    ///
    /// `simple_tls` selects the ldaps scheme; StartTLS and plaintext both
    /// start from a plain ldap connection.
    pub fn url(&self) -> String {
        match self.encryption {
            Some(Encryption::SimpleTls) => format!("ldaps://{}:{}", self.host, self.port),
            _ => format!("ldap://{}:{}", self.host, self.port),
        }
    }

    /// Whether the connection should upgrade via StartTLS after connecting.
    pub fn starttls(&self) -> bool {
        matches!(self.encryption, Some(Encryption::StartTls))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> DirectoryConfig {
        DirectoryConfig {
            host: "dc01.example.com".into(),
            port: DEFAULT_PORT,
            base: "dc=example,dc=com".into(),
            encryption: None,
            auth_method: AuthMethod::Simple,
            username: "cn=svc,dc=example,dc=com".into(),
            password: Some("secret".into()),
        }
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_required_fields() {
        let mut config = base_config();
        config.host.clear();
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.base.clear();
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.username.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn url_scheme_follows_encryption() {
        let mut config = base_config();
        assert_eq!(config.url(), "ldap://dc01.example.com:636");

        config.encryption = Some(Encryption::SimpleTls);
        assert_eq!(config.url(), "ldaps://dc01.example.com:636");

        config.encryption = Some(Encryption::StartTls);
        assert_eq!(config.url(), "ldap://dc01.example.com:636");
        assert!(config.starttls());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: DirectoryConfig = serde_json::from_value(serde_json::json!({
            "host": "dc01.example.com",
            "base": "dc=example,dc=com",
            "auth_method": "simple",
            "username": "jdoe"
        }))
        .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.encryption.is_none());
        assert!(config.password.is_none());
    }
}
