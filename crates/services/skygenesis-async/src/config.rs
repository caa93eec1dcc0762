use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};

use crate::error::SkyGenesisError;

/// Default Sky Genesis API base URL
pub const SKYGENESIS_DEFAULT_BASE: &str = "https://api.skygenesisenterprise.com";
/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
/// Default number of retries after a network failure
pub const DEFAULT_MAX_NETWORK_RETRIES: usize = 2;
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "SKYGENESIS_API_KEY";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "SKYGENESIS_BASE_URL";

const MISSING_KEY: &str = "API key is required";

fn default_user_agent() -> String {
    format!("skygenesis-async/{}", env!("CARGO_PKG_VERSION"))
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration for the Sky Genesis client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct SkyGenesisConfig {
    api_base: String,
    api_key: Option<SecretString>,
    timeout: Duration,
    max_network_retries: usize,
    user_agent: String,
}

impl Default for SkyGenesisConfig {
    fn default() -> Self {
        Self {
            api_base: env_non_empty(ENV_BASE_URL).unwrap_or_else(|| SKYGENESIS_DEFAULT_BASE.into()),
            api_key: env_non_empty(ENV_API_KEY).map(SecretString::from),
            timeout: DEFAULT_TIMEOUT,
            max_network_retries: DEFAULT_MAX_NETWORK_RETRIES,
            user_agent: default_user_agent(),
        }
    }
}

impl SkyGenesisConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `SKYGENESIS_API_KEY` for the API key
    /// - `SKYGENESIS_BASE_URL` for a custom base URL (defaults to `https://api.skygenesisenterprise.com`)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the request timeout (default 30s)
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how many times a request is retried after a network failure (default 2)
    #[must_use]
    pub const fn with_max_network_retries(mut self, retries: usize) -> Self {
        self.max_network_retries = retries;
        self
    }

    /// Sets the `User-Agent` header
    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|s| s.expose_secret())
            .filter(|k| !k.is_empty())
    }
}

/// Configuration trait for the Sky Genesis client
///
/// The client stores its configuration behind a copy-on-write snapshot:
/// setters run on a fresh clone, so implementors must be cheap to clone.
pub trait Config: Clone + Send + Sync + 'static {
    /// Returns HTTP headers to include in every request
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, SkyGenesisError>;

    /// Constructs the full URL for an API path
    fn url(&self, path: &str) -> String;

    /// Default per-request timeout
    fn timeout(&self) -> Duration;

    /// Retries allowed after a network failure
    fn max_network_retries(&self) -> usize;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if no usable key is configured.
    fn validate_auth(&self) -> Result<(), SkyGenesisError>;

    /// Replaces the API key
    fn set_api_key(&mut self, key: String);

    /// Replaces the default timeout
    fn set_timeout(&mut self, timeout: Duration);
}

impl Config for SkyGenesisConfig {
    fn headers(&self) -> Result<HeaderMap, SkyGenesisError> {
        let mut h = HeaderMap::new();

        if let Some(key) = self.key() {
            h.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|_| SkyGenesisError::request("invalid Authorization header"))?,
            );
        }
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        h.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|_| SkyGenesisError::request("invalid User-Agent header"))?,
        );

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn max_network_retries(&self) -> usize {
        self.max_network_retries
    }

    fn validate_auth(&self) -> Result<(), SkyGenesisError> {
        match self.key() {
            Some(_) => Ok(()),
            None => Err(SkyGenesisError::authentication(MISSING_KEY)),
        }
    }

    fn set_api_key(&mut self, key: String) {
        self.api_key = Some(SecretString::from(key));
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _key = EnvGuard::set(ENV_API_KEY, "sk-env");
        let _base = EnvGuard::set(ENV_BASE_URL, "https://staging.skygenesisenterprise.com");

        let cfg = SkyGenesisConfig::new();
        assert_eq!(cfg.api_base(), "https://staging.skygenesisenterprise.com");

        let h = cfg.headers().unwrap();
        assert_eq!(
            h.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer sk-env"
        );
    }

    #[test]
    #[serial(env)]
    fn config_defaults() {
        let _key = EnvGuard::remove(ENV_API_KEY);
        let _base = EnvGuard::remove(ENV_BASE_URL);

        let cfg = SkyGenesisConfig::new();
        assert_eq!(cfg.api_base(), SKYGENESIS_DEFAULT_BASE);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.max_network_retries(), 2);

        let err = cfg.validate_auth().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.message(), "API key is required");
    }

    #[test]
    fn wire_headers() {
        let cfg = SkyGenesisConfig::new().with_api_key("sk-test");
        let h = cfg.headers().unwrap();
        assert_eq!(h.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
        assert_eq!(h.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(
            h.get(USER_AGENT)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("skygenesis-async/")
        );
    }

    #[test]
    fn url_joins_without_double_slash() {
        let cfg = SkyGenesisConfig::new().with_api_base("http://localhost:8080/");
        assert_eq!(cfg.url("/users"), "http://localhost:8080/users");
        assert_eq!(cfg.url("users/u1"), "http://localhost:8080/users/u1");
    }

    #[test]
    fn validate_auth_rejects_only_empty() {
        assert!(SkyGenesisConfig::new().with_api_key("").validate_auth().is_err());
        assert!(SkyGenesisConfig::new().with_api_key(" ").validate_auth().is_ok());
        assert!(SkyGenesisConfig::new().with_api_key(" sk-1 ").validate_auth().is_ok());
    }

    #[test]
    fn key_is_sent_as_given() {
        let cfg = SkyGenesisConfig::new().with_api_key(" sk-1 ");
        assert_eq!(cfg.headers().unwrap().get(AUTHORIZATION).unwrap(), "Bearer  sk-1 ");
    }

    #[test]
    fn setters_replace_values() {
        let mut cfg = SkyGenesisConfig::new().with_api_key("old");
        cfg.set_api_key("new".into());
        cfg.set_timeout(Duration::from_millis(250));
        assert_eq!(cfg.headers().unwrap().get(AUTHORIZATION).unwrap(), "Bearer new");
        assert_eq!(cfg.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn invalid_key_is_request_error() {
        let cfg = SkyGenesisConfig::new().with_api_key("bad\nkey");
        let err = cfg.headers().unwrap_err();
        assert_eq!(err.message(), "Request error: invalid Authorization header");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = SkyGenesisConfig::new().with_api_key("sk-super-secret-12345");
        let debug_str = format!("{cfg:?}");
        assert!(!debug_str.contains("sk-super-secret-12345"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
