use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::engine::AggregationEngine;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::FeedFetcher;

/// Wires the components together from a loaded configuration.
pub struct AppContext {
    pub config: Config,
    pub engine: Arc<AggregationEngine>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let fetcher: Arc<dyn FeedFetcher + Send + Sync> = Arc::new(HttpFetcher::with_timeout(
            Duration::from_secs(config.fetch_timeout_secs),
        ));
        let engine = Arc::new(AggregationEngine::with_max_items(
            fetcher,
            config.policy,
            config.max_items,
        ));

        Self { config, engine }
    }
}
