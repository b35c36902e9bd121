use std::{env, fmt, time::Duration};

use layer_core::resource::short_id;
use url::Url;

use crate::error::ConfigError;

/// Default platform API host.
pub const DEFAULT_BASE_URL: &str = "https://api.layer.com";

/// Default value of the `version` parameter in the `Accept` header.
pub const DEFAULT_API_VERSION: &str = "1.0";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Client configuration. Set once, read-only afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Platform API host (default: "https://api.layer.com")
    pub base_url: String,
    /// Application id, short or fully qualified (`layer:///apps/staging/<uuid>`)
    pub app_id: String,
    /// Platform API bearer token
    pub token: String,
    /// API version sent in the `Accept` header (default: "1.0")
    pub api_version: String,
    /// Request timeout (default: 30s)
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration with default host, version and timeout.
    pub fn new(app_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: app_id.into(),
            token: token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LAYER_APP_ID` - Application id (required)
    /// - `LAYER_PLATFORM_TOKEN` - Platform API token (required)
    /// - `LAYER_BASE_URL` - API host (default: "https://api.layer.com")
    /// - `LAYER_API_VERSION` - API version (default: "1.0")
    /// - `LAYER_TIMEOUT_SECONDS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app_id = present("LAYER_APP_ID").ok_or(ConfigError::MissingAppId)?;
        let token = present("LAYER_PLATFORM_TOKEN").ok_or(ConfigError::MissingToken)?;

        let config = Self {
            base_url: present("LAYER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            app_id,
            token,
            api_version: present("LAYER_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: Duration::from_secs(
                present("LAYER_TIMEOUT_SECONDS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can produce well-formed requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_uuid().is_none() {
            return Err(ConfigError::MissingAppId);
        }
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        self.api_root().map(|_| ())
    }

    /// Trailing segment of the app id, the form used in URLs.
    pub fn app_uuid(&self) -> Option<&str> {
        short_id(self.app_id.trim())
    }

    /// Root URL all resource paths are joined to: `<base_url>/apps/<app_uuid>/`.
    pub fn api_root(&self) -> Result<Url, ConfigError> {
        let app = self.app_uuid().ok_or(ConfigError::MissingAppId)?;
        let mut base = self.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base =
            Url::parse(&base).map_err(|e| ConfigError::InvalidBaseUrl(format!("{base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(base.to_string()));
        }
        base.join(&format!("apps/{}/", app))
            .map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))
    }

    /// Value of the `Accept` header.
    pub fn accept_header(&self) -> String {
        format!("application/vnd.layer+json; version={}", self.api_version)
    }

    /// Value of the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("LAYER_APP_ID", "app-123"),
            ("LAYER_PLATFORM_TOKEN", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://api.layer.com");
        assert_eq!(config.api_version, "1.0");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("LAYER_APP_ID", "app-123"),
            ("LAYER_PLATFORM_TOKEN", "secret"),
            ("LAYER_BASE_URL", "http://localhost:8080"),
            ("LAYER_API_VERSION", "2.0"),
            ("LAYER_TIMEOUT_SECONDS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.api_version, "2.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("LAYER_APP_ID", "app-123"),
            ("LAYER_PLATFORM_TOKEN", "secret"),
            ("LAYER_TIMEOUT_SECONDS", "soon"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_required_values() {
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[("LAYER_PLATFORM_TOKEN", "secret")])),
            Err(ConfigError::MissingAppId)
        );
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[("LAYER_APP_ID", "app-123")])),
            Err(ConfigError::MissingToken)
        );
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[
                ("LAYER_APP_ID", "app-123"),
                ("LAYER_PLATFORM_TOKEN", "  ")
            ])),
            Err(ConfigError::MissingToken)
        );
    }

    #[test]
    fn test_qualified_app_id_is_shortened() {
        let config = ClientConfig::new("layer:///apps/staging/abc-123", "secret");
        assert_eq!(config.app_uuid(), Some("abc-123"));
        assert_eq!(
            config.api_root().unwrap().as_str(),
            "https://api.layer.com/apps/abc-123/"
        );
    }

    #[test]
    fn test_api_root_keeps_base_path() {
        let config = ClientConfig::new("abc", "secret").with_base_url("http://proxy.local/layer");
        assert_eq!(
            config.api_root().unwrap().as_str(),
            "http://proxy.local/layer/apps/abc/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::new("abc", "secret").with_base_url("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_headers() {
        let config = ClientConfig::new("abc", "secret").with_api_version("1.1");
        assert_eq!(
            config.accept_header(),
            "application/vnd.layer+json; version=1.1"
        );
        assert_eq!(config.authorization_header(), "Bearer secret");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("abc", "super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
