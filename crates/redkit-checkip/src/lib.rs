//! RedKit public-IP lookup.
//!
//! Opens a browser session (optionally proxied or routed over Tor),
//! navigates to a fixed check-IP page, and reads back the caller's observed
//! public address from the page's preformatted text block. Everything below
//! navigation is delegated to the [`Browser`] collaborator; the default one
//! is a blocking HTTP client.
//!
//! ```no_run
//! use redkit_checkip::{close, open, LookupConfig};
//!
//! # fn run() -> redkit_core::Result<()> {
//! let mut session = open(&LookupConfig::default())?;
//! println!("PUBLIC IP: {}", session.public_ip());
//! close(&mut session)?;
//! # Ok(())
//! # }
//! ```

pub mod browser;

use std::net::IpAddr;
use std::sync::OnceLock;

use redkit_core::error::{HandleError, Result};
use redkit_core::plugin::PluginInfo;
use regex::Regex;
use tracing::info;

pub use browser::{Browser, BrowserKind, HttpBrowser, LookupConfig, TOR_SOCKS_PROXY};

/// Page the observed address is read from.
pub const CHECKIP_URL: &str = "http://checkip.amazonaws.com";

/// Marker type carrying the plugin's self-description.
pub struct CheckIp;

impl PluginInfo for CheckIp {
    const NAME: &'static str = "checkip";

    fn usage() -> &'static str {
        "USAGE:
  let session = redkit_checkip::open(&LookupConfig {
      browser_type: 'optional firefox|chrome|ie|headless (defaults to firefox)',
      proxy: 'optional scheme://proxy_host:port',
      with_tor: 'optional bool (defaults to false)',
  })?;
  println!(\"PUBLIC IP: {}\", session.public_ip());

  redkit_checkip::close(&mut session)?;
"
    }
}

/// A lookup session holding the collaborator and the scraped address.
pub struct IpLookupSession<B: Browser> {
    browser: Option<B>,
    public_ip: String,
}

impl<B: Browser> IpLookupSession<B> {
    /// The raw address text scraped from the page.
    ///
    /// Not validated; see [`IpLookupSession::parse_addr`] for opt-in strict
    /// parsing.
    pub fn public_ip(&self) -> &str {
        &self.public_ip
    }

    /// Strictly parses the scraped text as an IP address.
    pub fn parse_addr(&self) -> Option<IpAddr> {
        self.public_ip.parse().ok()
    }
}

/// Opens a session with the default HTTP collaborator and performs the
/// lookup.
pub fn open(config: &LookupConfig) -> Result<IpLookupSession<HttpBrowser>> {
    open_with(HttpBrowser::open(config)?)
}

/// Performs the lookup through an already-built collaborator.
pub fn open_with<B: Browser>(mut browser: B) -> Result<IpLookupSession<B>> {
    let body = browser.navigate(CHECKIP_URL)?;
    let public_ip = extract_pre(&body);

    info!(public_ip = %public_ip, "observed public address");

    Ok(IpLookupSession {
        browser: Some(browser),
        public_ip,
    })
}

/// Closes the session via the collaborator.
pub fn close<B: Browser>(session: &mut IpLookupSession<B>) -> Result<()> {
    match session.browser.take() {
        Some(mut browser) => browser.close(),
        None => Err(HandleError::Disposed {
            plugin: CheckIp::NAME,
        }
        .into()),
    }
}

/// Extracts the first `<pre>` block, falling back to the trimmed body for
/// plain-text responses.
fn extract_pre(body: &str) -> String {
    static PRE_BLOCK: OnceLock<Regex> = OnceLock::new();
    let re = PRE_BLOCK.get_or_init(|| {
        Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").expect("pre block pattern")
    });

    match re.captures(body) {
        Some(captures) => captures[1].trim().to_string(),
        None => body.trim().to_string(),
    }
}
