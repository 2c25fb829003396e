pub mod http_fetcher;

use async_trait::async_trait;
use feed_rs::model::Entry;

use crate::app::Result;

/// Fetch-and-parse one feed source.
///
/// Implementations return the feed's entries in document order or a typed
/// error; they never retry and never cache. Retry policy, if any, belongs
/// to the caller.
#[async_trait]
pub trait FeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<Entry>>;
}
