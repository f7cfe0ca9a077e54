//! Gateway Configuration
//!
//! Defaults point at the overseas production deployment. A browser bundle
//! has no process environment, so host and base path can only be overridden
//! at build time through `AIMLINK_API_HOST` / `AIMLINK_BASE_API`.

use std::time::Duration;

const DEFAULT_API_HOST: &str = "https://app.aim.link/";
const DEFAULT_BASE_API: &str = "saasantapp/";
const DEFAULT_CLIENT_VERSION: &str = "mobile-v1.1";
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(50_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Scheme + host, e.g. `https://app.aim.link/`
    pub api_host: String,
    /// Gateway prefix appended to the host, e.g. `saasantapp/`
    pub base_api: String,
    /// Per-request timeout (native builds only)
    pub timeout: Duration,
    /// Sent as the `version` header
    pub client_version: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_host: option_env!("AIMLINK_API_HOST").unwrap_or(DEFAULT_API_HOST).to_string(),
            base_api: option_env!("AIMLINK_BASE_API").unwrap_or(DEFAULT_BASE_API).to_string(),
            timeout: DEFAULT_TIMEOUT,
            client_version: DEFAULT_CLIENT_VERSION.to_string(),
        }
    }
}

impl GatewayConfig {
    pub fn new(api_host: impl Into<String>, base_api: impl Into<String>) -> Self {
        Self {
            api_host: api_host.into(),
            base_api: base_api.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `api_host` + `base_api`, joined with exactly one slash and ending in one
    pub fn base_url(&self) -> String {
        let host = self.api_host.trim_end_matches('/');
        let base = self.base_api.trim_matches('/');
        if base.is_empty() {
            format!("{}/", host)
        } else {
            format!("{}/{}/", host, base)
        }
    }

    /// Strip a leading `/` and a leading copy of the base path
    pub fn normalize_path<'a>(&self, path: &'a str) -> &'a str {
        let path = path.strip_prefix('/').unwrap_or(path);
        let base = self.base_api.trim_start_matches('/');
        if base.is_empty() {
            return path;
        }
        path.strip_prefix(base).unwrap_or(path)
    }

    /// Full URL of an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), self.normalize_path(path))
    }
}
