use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::errors::SearchError;

/// Sends one live-search query and hands back the server's markup.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn fetch(&self, endpoint: &str, query: &str) -> Result<String, SearchError>;
}

/// `GET {endpoint}?query={query}` over reqwest.
#[derive(Clone)]
pub struct HttpSearchClient {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpSearchClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// Relative endpoints such as `/live-search/` are resolved against
    /// `base_url`, the way a browser resolves them against the page.
    pub fn with_base_url(base_url: &str) -> Result<Self, SearchError> {
        let base_url = Url::parse(base_url).map_err(|err| SearchError::InvalidEndpoint {
            endpoint: base_url.to_string(),
            message: err.to_string(),
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Some(base_url),
        })
    }

    pub fn resolve(&self, endpoint: &str) -> Result<Url, SearchError> {
        let resolved = match &self.base_url {
            Some(base) => base.join(endpoint),
            None => Url::parse(endpoint),
        };

        resolved.map_err(|err| SearchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })
    }
}

impl Default for HttpSearchClient {

    fn default() -> Self {
        Self::new()
    }

}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn fetch(&self, endpoint: &str, query: &str) -> Result<String, SearchError> {
        let url = self.resolve(endpoint)?;
        debug!("Sending live search for {:?} to {}", query, url);

        let response = self.client.get(url)
            .query(&[("query", query)])
            .send()
            .await?;

        match response.error_for_status() {
            Ok(response) => Ok(response.text().await?),
            Err(err) => match err.status() {
                Some(code) => Err(SearchError::Status(code)),
                None => Err(SearchError::Request(err)),
            },
        }
    }
}
