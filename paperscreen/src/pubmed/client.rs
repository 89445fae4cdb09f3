use crate::config::ClientConfig;
use crate::error::{Result, ScreenError};
use crate::pubmed::models::PubMedArticle;
use crate::pubmed::parser::PubMedXmlParser;
use crate::rate_limit::RateLimiter;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

/// Client for the PubMed E-utilities API
///
/// Two operations with deliberately different failure shapes:
/// [`search_ids`](Self::search_ids) absorbs every failure into an empty
/// result, while [`fetch_articles`](Self::fetch_articles) propagates
/// transport failures to the caller.
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a client with default configuration
    ///
    /// Uses the public E-utilities endpoint, no API key and the default
    /// NCBI rate limit (3 requests/second).
    ///
    /// # Example
    ///
    /// ```
    /// use paperscreen::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use paperscreen::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@example.com");
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();
        let base_url = config.effective_base_url().to_string();

        let client = Client::builder()
            .user_agent(concat!("paperscreen/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            rate_limiter,
            config,
        }
    }

    /// Search PubMed and return matching PMIDs, capped at the configured retmax
    ///
    /// This stage never fails: a blank query, a transport error, a non-2xx
    /// status and an unparseable response all collapse into an empty list
    /// with a logged diagnostic. Callers cannot distinguish "no matches"
    /// from "search failed", which is intentional.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paperscreen::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = PubMedClient::new();
    ///     let pmids = client.search_ids("diabetes treatment").await;
    ///     println!("Found {} papers", pmids.len());
    /// }
    /// ```
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_ids(&self, query: &str) -> Vec<String> {
        if query.trim().is_empty() {
            debug!("empty query provided, skipping search");
            return Vec::new();
        }

        self.rate_limiter.acquire().await;

        let retmax = self.config.retmax().to_string();
        let url = self.build_url(
            "esearch.fcgi",
            &[
                ("db", "pubmed"),
                ("term", query),
                ("retmax", &retmax),
                ("retmode", "xml"),
            ],
        );

        debug!("making ESearch request");
        match self.try_search(&url).await {
            Ok(mut ids) => {
                ids.truncate(self.config.retmax());
                info!(results = ids.len(), "search completed");
                ids
            }
            Err(e) => {
                warn!(error = %e, "search failed, treating as no results");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, url: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(url)
            .timeout(self.config.search_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScreenError::ApiError {
                message: http_status_message(response.status()),
            });
        }

        let xml = response.text().await?;
        PubMedXmlParser::parse_id_list(&xml)
    }

    /// Fetch metadata for the given PMIDs with one bulk EFetch request
    ///
    /// Transport failures and non-2xx statuses propagate to the caller.
    /// Individual article records that cannot be parsed are logged and
    /// skipped inside the parser; the rest of the batch is returned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paperscreen::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let articles = client.fetch_articles(&["31978945", "33515491"]).await?;
    ///     for article in articles {
    ///         println!("{}: {}", article.pmid, article.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(ids = ids.len()))]
    pub async fn fetch_articles(&self, ids: &[&str]) -> Result<Vec<PubMedArticle>> {
        self.rate_limiter.acquire().await;

        let joined = ids.join(",");
        let url = self.build_url(
            "efetch.fcgi",
            &[("db", "pubmed"), ("id", &joined), ("retmode", "xml")],
        );

        debug!("making EFetch request");
        let response = self
            .client
            .get(&url)
            .timeout(self.config.fetch_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "EFetch request failed");
            return Err(ScreenError::ApiError {
                message: http_status_message(response.status()),
            });
        }

        let xml = response.text().await?;
        let articles = PubMedXmlParser::parse_article_set(&xml)?;
        info!(articles = articles.len(), "fetched article metadata");
        Ok(articles)
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.base_url, endpoint);
        let mut separator = '?';

        for (key, value) in params {
            url.push(separator);
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            separator = '&';
        }
        for (key, value) in self.config.build_api_params() {
            url.push(separator);
            url.push_str(&key);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
            separator = '&';
        }

        url
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}

fn http_status_message(status: reqwest::StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status,
        status.canonical_reason().unwrap_or("Unknown error")
    )
}
