use std::time::Duration;

use crate::rate_limit::RateLimiter;

/// Default NCBI E-utilities base URL
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Maximum number of PMIDs a search returns
pub const DEFAULT_RETMAX: usize = 5;

/// Timeout for ESearch requests
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for EFetch requests
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the PubMed client
///
/// Controls the E-utilities endpoint, NCBI identification parameters,
/// request timeouts and rate limiting.
///
/// # Example
///
/// ```
/// use paperscreen::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_api_key_here")
///     .with_email("researcher@example.com")
///     .with_tool("my-pipeline");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Option<String>,
    api_key: Option<String>,
    email: Option<String>,
    tool: Option<String>,
    rate_limit: Option<f64>,
    retmax: usize,
    /// Timeout applied to ESearch requests
    pub search_timeout: Duration,
    /// Timeout applied to EFetch requests
    pub fetch_timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with default settings
    ///
    /// Defaults: public E-utilities endpoint, retmax of 5, 10s search
    /// timeout, 15s fetch timeout, NCBI default rate limit (3 req/s).
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            email: None,
            tool: None,
            rate_limit: None,
            retmax: DEFAULT_RETMAX,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set an NCBI API key (raises the allowed request rate to 10 req/s)
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the contact email sent with every request (recommended by NCBI)
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the tool name sent with every request
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Override the E-utilities base URL (used by tests to point at a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the request rate limit in requests per second
    pub fn with_rate_limit(mut self, requests_per_second: f64) -> Self {
        self.rate_limit = Some(requests_per_second);
        self
    }

    /// Override the maximum number of search results
    pub fn with_retmax(mut self, retmax: usize) -> Self {
        self.retmax = retmax;
        self
    }

    /// The base URL requests are sent to
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// The effective rate limit in requests per second
    ///
    /// An explicit `with_rate_limit` wins; otherwise 10 req/s with an API
    /// key, 3 req/s without (NCBI policy).
    pub fn effective_rate_limit(&self) -> f64 {
        if let Some(rate) = self.rate_limit {
            rate
        } else if self.api_key.is_some() {
            10.0
        } else {
            3.0
        }
    }

    /// The maximum number of PMIDs a search returns
    pub fn retmax(&self) -> usize {
        self.retmax
    }

    /// Build the NCBI identification query parameters (api_key, email, tool)
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(tool) = &self.tool {
            params.push(("tool".to_string(), tool.clone()));
        }
        params
    }

    /// Create a rate limiter matching this configuration
    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.effective_rate_limit())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
