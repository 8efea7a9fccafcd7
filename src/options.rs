// ABOUTME: Configuration options for rich object extraction including Options and ClientBuilder.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;

/// Default User-Agent sent with every request, unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Web Rich Object Client";

/// Default cap on downloaded body size, in bytes (10 MB).
pub const DEFAULT_DOWNLOAD_MAX_SIZE: usize = 10_000_000;

/// Configuration options for the extraction client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_download_size: usize,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        let user_agent = std::env::var("WRO_USER_AGENT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let max_download_size = std::env::var("WRO_DOWNLOAD_MAX_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_DOWNLOAD_MAX_SIZE);

        Self {
            timeout: Duration::from_secs(30),
            user_agent,
            max_download_size,
            headers: HashMap::new(),
            http_client: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the maximum number of body bytes read per download.
    pub fn max_download_size(mut self, bytes: usize) -> Self {
        self.opts.max_download_size = bytes;
        self
    }

    /// Add a custom header to all requests.
    ///
    /// A caller-supplied `User-Agent` header takes precedence over the
    /// configured default.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
