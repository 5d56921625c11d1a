use std::time::Duration;

use reqwest::Url;

/// Base path of the Django REST router.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/app/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gateway configuration, loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `http://host/app/api`.
    pub base_url: String,
    pub timeout: Duration,
    /// Initial cookie string (`name=value; name2=value2`).
    pub cookies: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cookies: None,
        }
    }

    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    /// SYLLABUS_API_BASE_URL defaults to "http://127.0.0.1:8000/app/api"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url =
            lookup("SYLLABUS_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = Url::parse(&base_url).map_err(|_| {
            ConfigError::Invalid("SYLLABUS_API_BASE_URL", "must be a valid URL")
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "SYLLABUS_API_BASE_URL",
                "scheme must be http or https",
            ));
        }

        let timeout_secs = match lookup("SYLLABUS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or(
                ConfigError::Invalid("SYLLABUS_REQUEST_TIMEOUT_SECS", "must be a positive integer"),
            )?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let cookies = lookup("SYLLABUS_COOKIES").filter(|c| !c.trim().is_empty());

        let mut config = ApiConfig::new(base_url).with_timeout(Duration::from_secs(timeout_secs));
        config.cookies = cookies;
        Ok(config)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
    /// The HTTP client could not be built from the configuration.
    Client(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
            ConfigError::Client(msg) => write!(f, "Failed to build HTTP client: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
