//! Client configuration.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, SeekError};
use crate::registry::ResourceRegistry;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// When `fetch_or_create` falls back to creating the resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreateFallback {
    /// Create after any API error from the fetch.
    #[default]
    AnyApiError,
    /// Create only when the fetch reports 404; other API errors propagate.
    NotFoundOnly,
}

/// Settings for a [`SeekClient`](crate::SeekClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use seekapi::{ClientConfig, CreateFallback};
///
/// let config = ClientConfig::new("https://fairdomhub.org")
///     .with_timeout(Duration::from_secs(10))
///     .with_ipv6(false)
///     .with_fallback(CreateFallback::NotFoundOnly);
/// assert!(!config.prefer_ipv6);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the SEEK instance.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// When false, the client only connects over IPv4.
    pub prefer_ipv6: bool,
    /// Allowed resource types per operation.
    pub registry: Arc<ResourceRegistry>,
    /// Fallback policy for `fetch_or_create`.
    pub fallback: CreateFallback,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
            prefer_ipv6: true,
            registry: Arc::new(ResourceRegistry::seek()),
            fallback: CreateFallback::default(),
        }
    }

    /// Read configuration from environment variables.
    ///
    /// - `SEEK_API_URL` (required)
    /// - `SEEK_TIMEOUT_SECS` (optional, defaults to 60)
    /// - `SEEK_IPV6` (optional, `0`/`false`/`no`/`off` disables IPv6)
    ///
    /// # Errors
    ///
    /// Returns an error if `SEEK_API_URL` is not set or a value is malformed.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("SEEK_API_URL").map_err(|_| {
            SeekError::ConfigMissing("SEEK_API_URL environment variable not set".to_string())
        })?;

        let mut config = Self::new(&base_url);

        if let Ok(secs) = env::var("SEEK_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&secs)?;
        }
        if let Ok(flag) = env::var("SEEK_IPV6") {
            config.prefer_ipv6 = parse_flag(&flag)?;
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_ipv6(mut self, prefer_ipv6: bool) -> Self {
        self.prefer_ipv6 = prefer_ipv6;
        self
    }

    pub fn with_registry(mut self, registry: ResourceRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_fallback(mut self, fallback: CreateFallback) -> Self {
        self.fallback = fallback;
        self
    }
}

fn parse_timeout(value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| {
            SeekError::InvalidConfig(format!(
                "SEEK_TIMEOUT_SECS must be a whole number of seconds, got '{value}'"
            ))
        })
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SeekError::InvalidConfig(format!(
            "SEEK_IPV6 must be a boolean, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://fairdomhub.org");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.prefer_ipv6);
        assert_eq!(config.fallback, CreateFallback::AnyApiError);
        assert!(config.registry.allows(crate::Operation::Fetch, "studies"));
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(" 15 ").unwrap(), Duration::from_secs(15));

        let err = parse_timeout("soon").unwrap_err();
        assert!(matches!(err, SeekError::InvalidConfig(_)));
        assert_eq!(
            err.to_string(),
            "Invalid FAIRDOM-SEEK configuration: SEEK_TIMEOUT_SECS must be a whole number of seconds, got 'soon'"
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag("off").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(matches!(parse_flag("maybe"), Err(SeekError::InvalidConfig(_))));
    }
}
