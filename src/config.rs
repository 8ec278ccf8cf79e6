//! Client configuration.
//!
//! Every knob the client honours lives in [`Options`], built once and never
//! mutated after a client is created. Build it with [`Options::builder()`] or
//! start from [`Options::default()`] and set the credential fields; any value
//! left unset keeps the documented default.
//!
//! | Field | Default |
//! |-------|---------|
//! | `environment_url` | `api.veryfi.com` |
//! | `http.timeout` | 3 s |
//! | `http.retry.count` | 3 |
//! | `http.retry.wait_time` | 100 ms |
//! | `http.retry.max_wait_time` | 3 s |
//!
//! `client_id`, `username` and `api_key` have no default and must be set
//! before a client is constructed.

use crate::error::VeryfiError;
use std::fmt;
use std::time::Duration;

/// Host used when none is configured.
pub const DEFAULT_ENVIRONMENT_URL: &str = "api.veryfi.com";

/// Root configuration of a Veryfi client.
///
/// # Example
/// ```rust
/// use veryfi::Options;
/// use std::time::Duration;
///
/// let options = Options::builder()
///     .client_id("CLIENT_ID")
///     .client_secret("CLIENT_SECRET")
///     .username("USERNAME")
///     .api_key("API_KEY")
///     .timeout(Duration::from_secs(10))
///     .retry_count(1)
///     .build()
///     .unwrap();
/// assert_eq!(options.environment_url, "api.veryfi.com");
/// ```
#[derive(Clone, PartialEq)]
pub struct Options {
    /// Host provided by Veryfi, without trailing `/`. A bare host is reached
    /// over `https`; a value with an explicit scheme (`http://127.0.0.1:8080`)
    /// is used as-is.
    pub environment_url: String,

    /// Client id provided by Veryfi.
    pub client_id: String,

    /// Client secret provided by Veryfi. Only the v8 client uses it, as the
    /// HMAC key of the request signature.
    pub client_secret: String,

    /// Username provided by Veryfi.
    pub username: String,

    /// API key provided by Veryfi.
    pub api_key: String,

    /// Options for the HTTP layer.
    pub http: HttpOptions,
}

/// Options for the HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpOptions {
    /// Time limit for one HTTP attempt.
    pub timeout: Duration,

    /// Retry policy for transport failures.
    pub retry: RetryOptions,
}

/// Backoff retry policy: the wait grows after each failed attempt until it
/// reaches `max_wait_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOptions {
    /// Number of retry attempts. Zero disables retries.
    pub count: u32,

    /// Wait before the first retry. Doubled after each attempt.
    pub wait_time: Duration,

    /// Cap on the wait between two attempts.
    pub max_wait_time: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            environment_url: DEFAULT_ENVIRONMENT_URL.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            username: String::new(),
            api_key: String::new(),
            http: HttpOptions::default(),
        }
    }
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            retry: RetryOptions::default(),
        }
    }
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            count: 3,
            wait_time: Duration::from_millis(100),
            max_wait_time: Duration::from_secs(3),
        }
    }
}

impl RetryOptions {
    /// Wait before retry number `attempt` (1-based): `wait_time * 2^(attempt-1)`,
    /// capped at `max_wait_time`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.wait_time
            .checked_mul(factor)
            .unwrap_or(self.max_wait_time)
            .min(self.max_wait_time)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("environment_url", &self.environment_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("username", &self.username)
            .field("api_key", &redact(&self.api_key))
            .field("http", &self.http)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

impl Options {
    /// Create a new builder for `Options`.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder {
            options: Self::default(),
        }
    }

    /// Check the invariants a client relies on.
    ///
    /// Called by every client constructor.
    pub fn validate(&self) -> Result<(), VeryfiError> {
        let required = [
            ("client_id", &self.client_id),
            ("username", &self.username),
            ("api_key", &self.api_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(VeryfiError::MissingConfig { field });
            }
        }
        if self.environment_url.trim().is_empty() {
            return Err(VeryfiError::MissingConfig {
                field: "environment_url",
            });
        }
        if self.http.timeout.is_zero() {
            return Err(VeryfiError::InvalidConfig(
                "HTTP timeout must be greater than zero".into(),
            ));
        }
        if self.http.retry.wait_time > self.http.retry.max_wait_time {
            return Err(VeryfiError::InvalidConfig(format!(
                "retry wait time {:?} exceeds max wait time {:?}",
                self.http.retry.wait_time, self.http.retry.max_wait_time
            )));
        }
        Ok(())
    }
}

/// Builder for [`Options`].
#[derive(Debug)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    pub fn environment_url(mut self, host: impl Into<String>) -> Self {
        self.options.environment_url = host.into();
        self
    }

    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.options.client_id = id.into();
        self
    }

    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.options.client_secret = secret.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.options.username = username.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.options.api_key = key.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.http.timeout = timeout;
        self
    }

    pub fn retry_count(mut self, count: u32) -> Self {
        self.options.http.retry.count = count;
        self
    }

    pub fn retry_wait_time(mut self, wait: Duration) -> Self {
        self.options.http.retry.wait_time = wait;
        self
    }

    pub fn retry_max_wait_time(mut self, wait: Duration) -> Self {
        self.options.http.retry.max_wait_time = wait;
        self
    }

    /// Build the options, validating constraints.
    pub fn build(self) -> Result<Options, VeryfiError> {
        self.options.validate()?;
        Ok(self.options)
    }
}
