//! Debounced catalog search.
//!
//! Requests are debounced rather than cancelled: every keystroke bumps a
//! generation counter, the task sleeps out the debounce window, and any
//! task that wakes to find itself superseded discards its result. An
//! in-flight response that arrives late is dropped the same way.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use pressroom_api_types::SearchResponse;
use tracing::debug;

use crate::application::gateway::{ApiError, SearchApi};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const MIN_QUERY_LEN: usize = 2;

/// What a single keystroke's task produced.
#[derive(Debug, PartialEq)]
pub enum SearchOutcome {
    Results(SearchResponse),
    /// Query too short; the UI clears its result panel.
    Cleared,
    /// A newer keystroke took over while this one waited or fetched.
    Superseded,
}

pub struct SearchController {
    api: Arc<dyn SearchApi>,
    debounce: Duration,
    min_query_len: usize,
    generation: AtomicU64,
}

impl SearchController {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self::with_debounce(api, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(api: Arc<dyn SearchApi>, debounce: Duration) -> Self {
        Self::with_options(api, debounce, MIN_QUERY_LEN)
    }

    pub fn with_options(api: Arc<dyn SearchApi>, debounce: Duration, min_query_len: usize) -> Self {
        Self {
            api,
            debounce,
            min_query_len,
            generation: AtomicU64::new(0),
        }
    }

    /// Handle one keystroke's query text.
    pub async fn query(&self, raw: &str) -> Result<SearchOutcome, ApiError> {
        let trimmed = raw.trim();
        // A short query still supersedes older in-flight searches so their
        // results cannot repopulate a cleared panel.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if trimmed.len() < self.min_query_len {
            return Ok(SearchOutcome::Cleared);
        }

        tokio::time::sleep(self.debounce).await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(SearchOutcome::Superseded);
        }

        let results = self.api.search(trimmed).await?;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(query = trimmed, "discarding stale search response");
            return Ok(SearchOutcome::Superseded);
        }
        Ok(SearchOutcome::Results(results))
    }
}
