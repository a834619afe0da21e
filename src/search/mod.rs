pub mod mock;
pub mod normalize;
pub mod providers;
pub mod query;
pub mod transport;

use serde::{Deserialize, Serialize};

pub use providers::RecipeSearch;
pub use transport::{ReqwestTransport, Transport, TransportResponse};

/// Image shown on a card when a result carries no image of its own
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=140&width=280";

/// Individual recipe search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title
    pub title: String,
    /// Absolute URL of the source page
    pub link: String,
    /// Description of the page content (may be empty)
    pub snippet: String,
    /// Image URL, if one is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SearchResult {
    /// Image URL to display, substituting the placeholder when absent
    pub fn image_or_placeholder(&self) -> &str {
        self.image
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// Why a search answered with generated mock data instead of provider data
#[derive(Debug)]
pub enum FallbackReason {
    /// API key or search engine id is not configured
    MissingCredentials,
    /// The provider could not be reached or answered badly
    Provider(SearchError),
}

/// Terminal state of one search invocation
#[derive(Debug)]
pub enum SearchOutcome {
    /// The provider returned at least one item
    Found(Vec<SearchResult>),
    /// The provider answered successfully with zero items
    Empty,
    /// Synthetic results generated from the ingredient list
    Fallback {
        reason: FallbackReason,
        results: Vec<SearchResult>,
    },
}

impl SearchOutcome {
    /// Borrow the results, whichever path produced them
    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchOutcome::Found(results) => results,
            SearchOutcome::Empty => &[],
            SearchOutcome::Fallback { results, .. } => results,
        }
    }

    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            SearchOutcome::Found(results) => results,
            SearchOutcome::Empty => Vec::new(),
            SearchOutcome::Fallback { results, .. } => results,
        }
    }

    /// True when the results are mock data
    pub fn is_fallback(&self) -> bool {
        matches!(self, SearchOutcome::Fallback { .. })
    }
}

/// Provider-facing errors. These never leave [`RecipeSearch`]; they are
/// recorded in [`FallbackReason::Provider`].
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("provider responded with status: {status}")]
    Status { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}
