use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Item;

/// The output of one aggregation pass: a bounded, recency-ordered,
/// title-deduplicated list of items plus the moment it was produced.
///
/// Only the latest result matters to a consumer; no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResult {
    pub items: Vec<Item>,
    /// When this pass completed, for "last updated" display.
    pub fetched_at: DateTime<Utc>,
}
