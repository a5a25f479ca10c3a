use url::Url;

use crate::error::Error;

/// Where a bridge lives and under which root its CLIP API is mounted.
///
/// The CLIP base is `{scheme}://{address}{api_root}` (normally
/// `https://<ip>/clip/v2/`); the legacy config endpoint sits beside it at
/// `{scheme}://{address}/api/config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeEndpoint {
    scheme: String,
    address: String,
    api_root: String,
}

impl BridgeEndpoint {
    pub const DEFAULT_SCHEME: &'static str = "https";
    pub const DEFAULT_API_ROOT: &'static str = "/clip/v2/";

    /// Endpoint for `address` (host or `host:port`) with the default
    /// scheme and API root.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            scheme: Self::DEFAULT_SCHEME.into(),
            address: address.into(),
            api_root: Self::DEFAULT_API_ROOT.into(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// The CLIP base URL, always ending in `/` so relative joins append.
    pub fn base_url(&self) -> Result<Url, Error> {
        let root = self.api_root.trim_matches('/');
        let full = if root.is_empty() {
            format!("{}://{}/", self.scheme, self.address)
        } else {
            format!("{}://{}/{root}/", self.scheme, self.address)
        };
        Ok(Url::parse(&full)?)
    }

    /// The unauthenticated software-version endpoint.
    pub fn config_url(&self) -> Result<Url, Error> {
        Ok(Url::parse(&format!(
            "{}://{}/api/config",
            self.scheme, self.address
        ))?)
    }
}
