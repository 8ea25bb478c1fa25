//! Directory session lifecycle and search operations.

use std::collections::HashMap;

use ldap3::{ldap_escape, LdapConn, LdapConnSettings, Scope, SearchEntry};
use redkit_core::credentials::CredentialSource;
use redkit_core::error::{HandleError, RedkitError, Result};
use redkit_core::plugin::PluginInfo;
use tracing::debug;

use crate::config::{AuthMethod, DirectoryConfig};

/// Attribute the account search filters on.
const ACCOUNT_NAME_ATTR: &str = "sAMAccountName";

/// Marker type carrying the plugin's self-description.
pub struct DirectoryDao;

impl PluginInfo for DirectoryDao {
    const NAME: &'static str = "dao-ldap";

    fn usage() -> &'static str {
        "USAGE:
  let session = redkit_ldap::connect(
      &DirectoryConfig {
          host: 'required host or IP',
          port: 'optional port (defaults to 636)',
          base: 'required base DN to search from (e.g. dc=example,dc=com)',
          encryption: 'optional simple_tls | start_tls',
          auth_method: 'required simple | sasl | gss_spnego',
          username: 'required bind username/DN',
          password: 'optional (credential source is asked when absent)',
      },
      &credential_source,
  )?;

  let entries = redkit_ldap::search_account(&mut session, 'account name')?;
  println!(\"{}\", entries[0].dn);

  redkit_ldap::disconnect(&mut session)?;
"
    }
}

/// A live, bound directory session.
///
/// Owns the underlying `ldap3` connection; disposal takes it out, and any
/// later operation fails with a handle error before a delegated call is
/// attempted.
pub struct DirectorySession {
    conn: Option<LdapConn>,
    base: String,
}

impl DirectorySession {
    /// Base DN this session searches from.
    pub fn base(&self) -> &str {
        &self.base
    }

    fn conn_mut(&mut self) -> Result<&mut LdapConn> {
        self.conn.as_mut().ok_or_else(|| {
            HandleError::Disposed {
                plugin: DirectoryDao::NAME,
            }
            .into()
        })
    }
}

/// A directory entry with parsed attributes.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Distinguished Name.
    pub dn: String,

    /// Text attributes (all values are multi-valued).
    pub attributes: HashMap<String, Vec<String>>,

    /// Binary attributes.
    pub binary_attributes: HashMap<String, Vec<Vec<u8>>>,
}

impl DirectoryEntry {
    /// Converts an `ldap3` search entry.
    #[must_use]
    pub fn from_search_entry(entry: SearchEntry) -> Self {
        Self {
            dn: entry.dn,
            attributes: entry.attrs,
            binary_attributes: entry.bin_attrs,
        }
    }

    /// Gets a single-valued attribute.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Gets a multi-valued attribute.
    #[must_use]
    pub fn get_attrs(&self, name: &str) -> Option<&Vec<String>> {
        self.attributes.get(name)
    }

    /// Checks if the entry has an attribute.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

/// Establishes and binds a directory session.
///
/// The password comes from the configuration when present, otherwise from
/// the injected credential source. Bind failures surface as directory
/// errors; nothing is returned as a success value on failure.
pub fn connect(
    config: &DirectoryConfig,
    credentials: &dyn CredentialSource,
) -> Result<DirectorySession> {
    config.validate()?;

    let password = match &config.password {
        Some(password) => password.clone(),
        None => credentials.password(&format!("Password for {}: ", config.username))?,
    };

    let url = config.url();
    let mut settings = LdapConnSettings::new();
    if config.starttls() {
        settings = settings.set_starttls(true);
    }

    let mut conn = LdapConn::with_settings(settings, &url)
        .map_err(|e| RedkitError::directory(format!("connect to {url} failed: {e}")))?;

    match config.auth_method {
        AuthMethod::Simple => {
            conn.simple_bind(&config.username, &password)
                .map_err(|e| RedkitError::directory(format!("bind failed: {e}")))?
                .success()
                .map_err(|e| {
                    RedkitError::directory(format!("bind as {} failed: {e}", config.username))
                })?;
        }
        AuthMethod::Sasl => {
            conn.sasl_external_bind()
                .map_err(|e| RedkitError::directory(format!("SASL bind failed: {e}")))?
                .success()
                .map_err(|e| RedkitError::directory(format!("SASL bind failed: {e}")))?;
        }
        AuthMethod::GssSpnego => {
            return Err(RedkitError::directory(
                "GSS-SPNEGO bind requires a Kerberos-enabled ldap3 build",
            ));
        }
    }

    debug!(url = %url, base = %config.base, "directory session bound");

    Ok(DirectorySession {
        conn: Some(conn),
        base: config.base.clone(),
    })
}

/// Builds the equality filter for an account search.
///
/// The username is escaped so filter metacharacters in caller input cannot
/// change the query.
pub fn account_filter(username: &str) -> String {
    format!("({}={})", ACCOUNT_NAME_ATTR, ldap_escape(username))
}

/// Searches the session's base subtree for an account by name.
///
/// An unknown username yields an empty entry set, not an error.
pub fn search_account(
    session: &mut DirectorySession,
    username: &str,
) -> Result<Vec<DirectoryEntry>> {
    let base = session.base.clone();
    let filter = account_filter(username);
    let conn = session.conn_mut()?;

    let (rs, _result) = conn
        .search(&base, Scope::Subtree, &filter, vec!["*"])
        .map_err(|e| RedkitError::directory(format!("search failed: {e}")))?
        .success()
        .map_err(|e| RedkitError::directory(format!("search failed: {e}")))?;

    debug!(filter = %filter, hits = rs.len(), "account search completed");

    Ok(rs
        .into_iter()
        .map(SearchEntry::construct)
        .map(DirectoryEntry::from_search_entry)
        .collect())
}

/// Unbinds and releases the session.
///
/// Disposing an already-disposed session is a quiet no-op.
pub fn disconnect(session: &mut DirectorySession) -> Result<()> {
    match session.conn.take() {
        Some(mut conn) => conn
            .unbind()
            .map_err(|e| RedkitError::directory(format!("unbind failed: {e}"))),
        None => Ok(()),
    }
}
