//! RedKit directory access object.
//!
//! A thin wrapper over the [`ldap3`] synchronous client for interacting with
//! Active Directory / LDAP servers. It adds configuration validation,
//! credential injection, and the uniform session-handle lifecycle; all
//! protocol work (TLS, bind, search) is delegated to `ldap3`.
//!
//! ```no_run
//! use redkit_core::StaticCredential;
//! use redkit_ldap::{connect, disconnect, search_account, AuthMethod, DirectoryConfig};
//!
//! # fn run() -> redkit_core::Result<()> {
//! let config = DirectoryConfig {
//!     host: "dc01.example.com".into(),
//!     port: 636,
//!     base: "dc=example,dc=com".into(),
//!     encryption: Some(redkit_ldap::Encryption::SimpleTls),
//!     auth_method: AuthMethod::Simple,
//!     username: "cn=svc,dc=example,dc=com".into(),
//!     password: None,
//! };
//!
//! let mut session = connect(&config, &StaticCredential::new("secret"))?;
//! let entries = search_account(&mut session, "jdoe")?;
//! disconnect(&mut session)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dao;

pub use config::{AuthMethod, DirectoryConfig, Encryption};
pub use dao::{
    account_filter, connect, disconnect, search_account, DirectoryDao, DirectoryEntry,
    DirectorySession,
};
