use crate::config::{Credentials, SearchSettings};
use crate::logging::redact_secrets;
use crate::search::mock::mock_recipes;
use crate::search::normalize::{normalize, parse_response};
use crate::search::query::search_url;
use crate::search::transport::{ReqwestTransport, Transport};
use crate::search::{FallbackReason, SearchError, SearchOutcome, SearchResult};
use std::sync::Arc;
use std::time::Duration;

/// Recipe search backed by the Google Custom Search JSON API
///
/// Requires an API key and a programmable search engine id (`cx`).
/// Without them every search answers with generated mock recipes.
/// Documentation: https://developers.google.com/custom-search/v1/overview
pub struct RecipeSearch {
    transport: Arc<dyn Transport>,
    credentials: Option<Credentials>,
    endpoint: String,
}

impl RecipeSearch {
    /// Create a search service over an explicit transport
    pub fn new(settings: &SearchSettings, transport: Arc<dyn Transport>) -> Self {
        let credentials = settings.credentials();
        if credentials.is_none() {
            tracing::warn!("google api key or search engine id is missing, using mock data instead");
        }

        tracing::info!(endpoint = %settings.endpoint, "recipe search initialized");

        Self {
            transport,
            credentials,
            endpoint: settings.endpoint.clone(),
        }
    }

    /// Create a search service with the default reqwest transport
    pub fn from_settings(settings: &SearchSettings) -> Result<Self, SearchError> {
        let timeout = settings.timeout_secs.map(Duration::from_secs);
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::new(settings, Arc::new(transport)))
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Search and flatten the outcome; never fails
    pub async fn search_recipes(&self, ingredients: &str) -> Vec<SearchResult> {
        self.search(ingredients).await.into_results()
    }

    /// Search recipes for a `", "`-joined ingredient string.
    ///
    /// Provider failures are absorbed: they produce
    /// [`SearchOutcome::Fallback`] with mock data, never an error.
    pub async fn search(&self, ingredients: &str) -> SearchOutcome {
        let Some(credentials) = &self.credentials else {
            return SearchOutcome::Fallback {
                reason: FallbackReason::MissingCredentials,
                results: mock_recipes(ingredients),
            };
        };

        match self.fetch(credentials, ingredients).await {
            Ok(Some(results)) => SearchOutcome::Found(results),
            Ok(None) => {
                tracing::debug!(ingredients = %ingredients, "provider returned no items");
                SearchOutcome::Empty
            }
            Err(e) => {
                // Status errors were already logged with the response body
                if !matches!(e, SearchError::Status { .. }) {
                    tracing::error!(error = %e, "recipe search failed, falling back to mock data");
                }
                SearchOutcome::Fallback {
                    reason: FallbackReason::Provider(e),
                    results: mock_recipes(ingredients),
                }
            }
        }
    }

    async fn fetch(
        &self,
        credentials: &Credentials,
        ingredients: &str,
    ) -> Result<Option<Vec<SearchResult>>, SearchError> {
        let url = search_url(&self.endpoint, credentials, ingredients);

        tracing::debug!(
            url = %redact_secrets(&url),
            ingredients = %ingredients,
            "performing recipe search"
        );

        let response = self.transport.get(&url).await?;

        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                body = %redact_secrets(&response.body),
                "google custom search api error, falling back to mock data"
            );
            return Err(SearchError::Status {
                status: response.status,
            });
        }

        let results = normalize(parse_response(&response.body)?);

        tracing::debug!(
            result_count = results.as_ref().map(Vec::len).unwrap_or(0),
            "recipe search completed"
        );

        Ok(results)
    }
}
