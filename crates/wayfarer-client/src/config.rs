//! Service configuration.

use std::time::Duration;

use wayfarer_core::UnconfiguredServiceError;

/// Environment variable holding the backend base URL.
pub const URL_VAR: &str = "WAYFARER_SERVICE_URL";

/// Environment variable holding the backend API key.
pub const KEY_VAR: &str = "WAYFARER_SERVICE_KEY";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the hosted backend.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Base URL (e.g., "https://abc.example.co"), without trailing slash.
    pub url: String,

    /// API key sent as `apikey` and bearer token.
    pub key: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Base URL for public asset links. Defaults to the storage API's
    /// public object path.
    pub public_base_url: Option<String>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

impl ServiceConfig {
    /// Create a configuration for a backend URL and key.
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim().trim_end_matches('/').to_string(),
            key: key.into().trim().to_string(),
            timeout: DEFAULT_TIMEOUT,
            public_base_url: None,
        }
    }

    /// Read [`URL_VAR`] and [`KEY_VAR`] from the process environment.
    ///
    /// Empty values count as absent.
    pub fn from_env() -> Result<Self, UnconfiguredServiceError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, UnconfiguredServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let url = read(URL_VAR);
        let key = read(KEY_VAR);

        match (url, key) {
            (Some(url), Some(key)) => Ok(Self::new(url, key)),
            (url, key) => {
                let mut missing = Vec::new();
                if url.is_none() {
                    missing.push(URL_VAR);
                }
                if key.is_none() {
                    missing.push(KEY_VAR);
                }
                Err(UnconfiguredServiceError::new(missing))
            }
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Serve staged assets from a different base URL (CDN, bucket website).
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// Public URL of an uploaded object.
    pub fn public_url(&self, bucket: &str, name: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}/{}", base, bucket, name),
            None => format!("{}/storage/v1/object/public/{}/{}", self.url, bucket, name),
        }
    }
}
