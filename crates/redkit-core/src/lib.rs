//! # RedKit Core
//!
//! Shared building blocks for the RedKit plugin wrappers.
//!
//! Every integration in this workspace follows the same shape: a connection
//! factory builds a typed session handle from a validated configuration
//! structure, zero or more operations run against that handle, and a disposal
//! call releases it. This crate provides the pieces that shape has in common:
//!
//! - **Errors**: one discriminated error surface ([`RedkitError`]) used by
//!   every wrapper, so callers never have to distinguish between wrappers
//!   that raise and wrappers that return failure text as a result.
//! - **Plugin descriptors**: the uniform `NAME` / `authors` / `usage`
//!   self-description contract ([`plugin::PluginInfo`]).
//! - **Credentials**: the [`credentials::CredentialSource`] seam separating
//!   interactive password elicitation from connection establishment.

pub mod credentials;
pub mod error;
pub mod plugin;

pub use credentials::{CredentialSource, PromptCredential, StaticCredential};
pub use error::{ConfigError, HandleError, RedkitError, Result};
pub use plugin::PluginInfo;
