//! # Confluence
//!
//! A multi-source news feed aggregator: several unreliable remote feeds in,
//! one deduplicated, recency-ordered, bounded list out, refreshed on a
//! fixed interval.
//!
//! ## Architecture
//!
//! ```text
//! Scheduler → AggregationEngine → (FeedFetcher × N) → Normalizer
//!                                 → merge/dedup/rank → Consumer
//! ```
//!
//! - [`fetcher`]: fetch-and-parse one source behind an async trait
//! - [`normalizer`]: feed entries → canonical [`Item`](domain::Item)s
//! - [`engine`]: failure-tolerant merge, dedup by title, recency ranking
//! - [`scheduler`]: fixed-period refresh loop publishing to a consumer
//!
//! Individual source failures are logged and skipped; a pass only fails
//! when every source failed or returned nothing.

/// Application context and error handling.
pub mod app;

/// Command-line interface and terminal presentation.
pub mod cli;

/// TOML configuration: sources, refresh period, fallback policy, bounds.
pub mod config;

/// Core value types: [`Item`](domain::Item), [`Source`](domain::Source),
/// [`AggregationResult`](domain::AggregationResult).
pub mod domain;

/// The aggregation engine and its fallback policies.
pub mod engine;

/// Feed fetching: [`FeedFetcher`](fetcher::FeedFetcher) trait and the
/// reqwest-based implementation.
pub mod fetcher;

/// Converts parsed feed entries into canonical items.
pub mod normalizer;

/// Fixed-period refresh loop and the [`Consumer`](scheduler::Consumer)
/// seam it publishes through.
pub mod scheduler;
