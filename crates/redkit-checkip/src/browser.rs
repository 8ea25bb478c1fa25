//! The browser collaborator seam and its default HTTP implementation.

use redkit_core::error::{RedkitError, Result};
use serde::{Deserialize, Serialize};

/// Default Tor SOCKS endpoint used when `with_tor` is set without an
/// explicit proxy.
pub const TOR_SOCKS_PROXY: &str = "socks5h://127.0.0.1:9050";

/// An external page-rendering collaborator.
///
/// All rendering/protocol work lives behind this trait; the lookup logic
/// only navigates and reads back page text.
pub trait Browser {
    /// Navigates to a URL and returns the rendered page body.
    fn navigate(&mut self, url: &str) -> Result<String>;

    /// Tears the session down.
    fn close(&mut self) -> Result<()>;
}

/// Rendering engine selection.
///
/// The default HTTP collaborator maps this to the User-Agent it presents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserKind {
    /// Desktop Firefox (default)
    #[default]
    Firefox,
    /// Desktop Chrome
    Chrome,
    /// Internet Explorer
    Ie,
    /// Headless session
    Headless,
}

impl BrowserKind {
    /// User-Agent string presented by the HTTP collaborator.
    pub fn user_agent(&self) -> &'static str {
        match self {
            Self::Firefox => {
                "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
            }
            Self::Chrome => {
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"
            }
            Self::Ie => "Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko",
            Self::Headless => "redkit-checkip/0.2",
        }
    }
}

/// Configuration for opening a lookup session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Rendering engine selection
    #[serde(default)]
    pub browser_type: BrowserKind,

    /// Explicit egress proxy (`scheme://host:port`)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Route via the local Tor SOCKS endpoint when no explicit proxy is set
    #[serde(default)]
    pub with_tor: bool,
}

impl LookupConfig {
    /// Effective proxy URL, if any.
    pub fn proxy_url(&self) -> Option<String> {
        match (&self.proxy, self.with_tor) {
            (Some(proxy), _) => Some(proxy.clone()),
            (None, true) => Some(TOR_SOCKS_PROXY.to_string()),
            (None, false) => None,
        }
    }
}

/// Default collaborator: a blocking HTTP client.
pub struct HttpBrowser {
    client: reqwest::blocking::Client,
}

impl HttpBrowser {
    /// Builds the client per the lookup configuration.
    pub fn open(config: &LookupConfig) -> Result<Self> {
        let mut builder =
            reqwest::blocking::Client::builder().user_agent(config.browser_type.user_agent());

        if let Some(url) = config.proxy_url() {
            let proxy = reqwest::Proxy::all(&url)
                .map_err(|e| RedkitError::lookup(format!("proxy {url} rejected: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| RedkitError::lookup(format!("client build failed: {e}")))?;

        Ok(Self { client })
    }
}

impl Browser for HttpBrowser {
    fn navigate(&mut self, url: &str) -> Result<String> {
        self.client
            .get(url)
            .send()
            .map_err(|e| RedkitError::lookup(format!("GET {url} failed: {e}")))?
            .text()
            .map_err(|e| RedkitError::lookup(format!("read body from {url} failed: {e}")))
    }

    fn close(&mut self) -> Result<()> {
        // The blocking client tears its pool down on drop.
        Ok(())
    }
}
