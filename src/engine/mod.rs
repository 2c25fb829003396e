use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::app::{ConfluenceError, Result};
use crate::domain::{AggregationResult, Item, Source};
use crate::fetcher::FeedFetcher;
use crate::normalizer::Normalizer;

pub const DEFAULT_MAX_ITEMS: usize = 30;

/// How a pass handles sources that fail or come back empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Fetch every source, skip failures, merge everything that succeeded.
    #[default]
    CollectAll,
    /// Walk sources in order and keep only the first that yields any items.
    FirstSuccess,
}

/// Runs one merge/dedup/rank pass over the configured sources.
///
/// Per-source failures never abort a pass; the only fatal outcome is every
/// source failing or yielding nothing.
pub struct AggregationEngine {
    fetcher: Arc<dyn FeedFetcher + Send + Sync>,
    normalizer: Normalizer,
    policy: FallbackPolicy,
    max_items: usize,
}

impl AggregationEngine {
    pub fn new(fetcher: Arc<dyn FeedFetcher + Send + Sync>, policy: FallbackPolicy) -> Self {
        Self::with_max_items(fetcher, policy, DEFAULT_MAX_ITEMS)
    }

    pub fn with_max_items(
        fetcher: Arc<dyn FeedFetcher + Send + Sync>,
        policy: FallbackPolicy,
        max_items: usize,
    ) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            policy,
            max_items,
        }
    }

    /// Run one aggregation pass.
    ///
    /// The merged list is stable-sorted most-recent-first (undated items
    /// rank below every dated one), deduplicated by raw title keeping the
    /// first post-sort occurrence, and truncated to `max_items`. Sorting
    /// before dedup means the newest instance of a repeated title wins.
    pub async fn aggregate(&self, sources: &[Source]) -> Result<AggregationResult> {
        let mut merged = match self.policy {
            FallbackPolicy::CollectAll => self.collect_all(sources).await,
            FallbackPolicy::FirstSuccess => self.first_success(sources).await,
        };

        if merged.is_empty() {
            return Err(ConfluenceError::AllSourcesFailed {
                sources: sources.len(),
            });
        }

        merged.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let mut seen = HashSet::new();
        merged.retain(|item| seen.insert(item.title.clone()));
        merged.truncate(self.max_items);

        Ok(AggregationResult {
            items: merged,
            fetched_at: Utc::now(),
        })
    }

    /// Fetch every source concurrently and concatenate the survivors in
    /// configured source order, so ties in the later sort stay deterministic.
    async fn collect_all(&self, sources: &[Source]) -> Vec<Item> {
        let fetches = sources
            .iter()
            .map(|source| async move { (source, self.fetch_one(source).await) });

        let mut merged = Vec::new();
        for (source, result) in join_all(fetches).await {
            match result {
                Ok(items) => merged.extend(items),
                Err(e) => warn!(source = %source.url, error = %e, "source failed, skipping"),
            }
        }
        merged
    }

    /// Try sources in order, short-circuiting at the first that yields any
    /// items. Errors and empty feeds both move on to the next source.
    async fn first_success(&self, sources: &[Source]) -> Vec<Item> {
        for source in sources {
            match self.fetch_one(source).await {
                Ok(items) if !items.is_empty() => return items,
                Ok(_) => debug!(source = %source.url, "source returned no items, trying next"),
                Err(e) => warn!(source = %source.url, error = %e, "source failed, trying next"),
            }
        }
        Vec::new()
    }

    async fn fetch_one(&self, source: &Source) -> Result<Vec<Item>> {
        let entries = self.fetcher.fetch(&source.url).await?;
        Ok(entries
            .into_iter()
            .map(|entry| self.normalizer.normalize(entry, &source.label))
            .collect())
    }
}
