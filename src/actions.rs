use crate::search::{RecipeSearch, SearchOutcome, SearchResult};
use std::sync::Arc;

/// Shown when a search could not complete at all
pub const GENERIC_FAILURE_MESSAGE: &str = "検索中にエラーが発生しました。もう一度お試しください。";

const SYNTHETIC_MESSAGE: &str = "検索APIに接続できないため、サンプルのレシピを表示しています。";

/// Shown when the provider found nothing
pub const NO_RESULTS_MESSAGE: &str = "レシピが見つかりませんでした。別の食材を試してみてください。";

/// Banner the UI shows alongside the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Results are generated mock data
    Synthetic,
    /// The provider found nothing
    NoResults,
    /// The search itself failed
    Failed(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Synthetic => SYNTHETIC_MESSAGE,
            Notice::NoResults => NO_RESULTS_MESSAGE,
            Notice::Failed(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Failed(_))
    }
}

/// What the presentation layer receives for one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub results: Vec<SearchResult>,
    pub notice: Option<Notice>,
}

impl SearchReport {
    pub fn from_outcome(outcome: SearchOutcome) -> Self {
        let notice = match &outcome {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Empty => Some(Notice::NoResults),
            SearchOutcome::Fallback { .. } => Some(Notice::Synthetic),
        };

        Self {
            results: outcome.into_results(),
            notice,
        }
    }

    pub fn failed() -> Self {
        Self {
            results: Vec::new(),
            notice: Some(Notice::Failed(GENERIC_FAILURE_MESSAGE.to_string())),
        }
    }
}

/// Run one search behind a failure guard.
///
/// The search runs on its own task; if that task dies the caller still gets
/// an empty report with a generic error notice.
pub async fn search_recipes(searcher: Arc<RecipeSearch>, ingredients: String) -> SearchReport {
    let task = tokio::spawn(async move { searcher.search(&ingredients).await });

    match task.await {
        Ok(outcome) => SearchReport::from_outcome(outcome),
        Err(e) => {
            tracing::error!(error = %e, "error searching recipes");
            SearchReport::failed()
        }
    }
}
