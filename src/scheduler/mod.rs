use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::app::ConfluenceError;
use crate::domain::{AggregationResult, Source};
use crate::engine::AggregationEngine;

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

/// Receives the outcome of every refresh tick: the fresh result, or the
/// aggregate error when the whole pass failed. Rendering is entirely the
/// consumer's business.
#[async_trait]
pub trait Consumer: Send + Sync {
    async fn publish(&self, outcome: std::result::Result<AggregationResult, ConfluenceError>);
}

/// Drives the engine on a fixed period: one pass immediately on start, then
/// one per tick, each outcome handed to the consumer.
///
/// Ticks are serialized. An overrunning pass delays the next tick rather
/// than overlapping it, and a failing pass never stops the loop; the next
/// tick retries from scratch. The scheduler owns its timer, no process-wide
/// state.
pub struct Scheduler {
    engine: Arc<AggregationEngine>,
    sources: Vec<Source>,
    consumer: Arc<dyn Consumer>,
    period: Duration,
    running: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(
        engine: Arc<AggregationEngine>,
        sources: Vec<Source>,
        consumer: Arc<dyn Consumer>,
        period: Duration,
    ) -> Self {
        Self {
            engine,
            sources,
            consumer,
            period,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Run until [`stop`](Self::stop) is called. The in-flight pass always
    /// completes (and publishes) before the loop exits; cancelling mid-pass
    /// means dropping this future instead.
    pub async fn run(&self) {
        info!(period_secs = self.period.as_secs(), "scheduler started");

        // The interval's first tick completes immediately, giving the
        // initial pass on start.
        let mut timer = interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while self.running.load(Ordering::SeqCst) {
            timer.tick().await;

            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            self.tick().await;
        }

        info!("scheduler stopped");
    }

    async fn tick(&self) {
        let outcome = self.engine.aggregate(&self.sources).await;
        if let Err(e) = &outcome {
            error!(error = %e, "refresh pass failed");
        }
        self.consumer.publish(outcome).await;
    }

    /// Request the loop to stop after the current tick. Safe to call from
    /// another task.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use feed_rs::model::{Entry, Text};
    use tokio::sync::Mutex;

    use crate::app::Result;
    use crate::engine::FallbackPolicy;
    use crate::fetcher::FeedFetcher;

    struct StaticFetcher {
        feeds: HashMap<String, Vec<Entry>>,
    }

    #[async_trait]
    impl FeedFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<Entry>> {
            self.feeds
                .get(url)
                .cloned()
                .ok_or_else(|| ConfluenceError::FeedParse(format!("no feed at {url}")))
        }
    }

    #[derive(Default)]
    struct RecordingConsumer {
        outcomes: Mutex<Vec<std::result::Result<AggregationResult, ConfluenceError>>>,
    }

    #[async_trait]
    impl Consumer for RecordingConsumer {
        async fn publish(
            &self,
            outcome: std::result::Result<AggregationResult, ConfluenceError>,
        ) {
            self.outcomes.lock().await.push(outcome);
        }
    }

    fn engine_with(feeds: Vec<(&str, Vec<Entry>)>) -> Arc<AggregationEngine> {
        let fetcher = Arc::new(StaticFetcher {
            feeds: feeds
                .into_iter()
                .map(|(url, entries)| (url.to_string(), entries))
                .collect(),
        });
        Arc::new(AggregationEngine::new(fetcher, FallbackPolicy::CollectAll))
    }

    fn entry(title: &str) -> Entry {
        Entry {
            title: Some(Text {
                content_type: "text/plain".parse().unwrap(),
                src: None,
                content: title.to_string(),
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn publishes_immediately_and_then_per_tick() {
        let engine = engine_with(vec![("a", vec![entry("hello")])]);
        let consumer = Arc::new(RecordingConsumer::default());
        let scheduler = Arc::new(Scheduler::new(
            engine,
            vec![Source::new("a", "a")],
            consumer.clone(),
            Duration::from_millis(25),
        ));

        let runner = scheduler.clone();
        let handle = tokio::spawn(async move { runner.run().await });

        tokio::time::sleep(Duration::from_millis(70)).await;
        scheduler.stop();
        handle.await.unwrap();

        let outcomes = consumer.outcomes.lock().await;
        // Initial pass plus at least two periodic ones.
        assert!(outcomes.len() >= 3, "got {} outcomes", outcomes.len());
        assert!(outcomes.iter().all(|o| o.is_ok()));
        assert_eq!(outcomes[0].as_ref().unwrap().items[0].title, "hello");
    }

    #[test]
    fn keeps_ticking_after_failed_passes() {
        tokio_test::block_on(async {
            // No feeds scripted, so every pass fails with AllSourcesFailed.
            let engine = engine_with(vec![]);
            let consumer = Arc::new(RecordingConsumer::default());
            let scheduler = Arc::new(Scheduler::new(
                engine,
                vec![Source::new("missing", "missing")],
                consumer.clone(),
                Duration::from_millis(20),
            ));

            let runner = scheduler.clone();
            let handle = tokio::spawn(async move { runner.run().await });

            tokio::time::sleep(Duration::from_millis(55)).await;
            scheduler.stop();
            handle.await.unwrap();

            let outcomes = consumer.outcomes.lock().await;
            assert!(outcomes.len() >= 2, "got {} outcomes", outcomes.len());
            assert!(outcomes.iter().all(|o| matches!(
                o,
                Err(ConfluenceError::AllSourcesFailed { .. })
            )));
        });
    }

    #[tokio::test]
    async fn stop_prevents_further_publishes() {
        let engine = engine_with(vec![("a", vec![entry("hello")])]);
        let consumer = Arc::new(RecordingConsumer::default());
        let scheduler = Arc::new(Scheduler::new(
            engine,
            vec![Source::new("a", "a")],
            consumer.clone(),
            Duration::from_millis(10),
        ));

        let runner = scheduler.clone();
        let handle = tokio::spawn(async move { runner.run().await });

        tokio::time::sleep(Duration::from_millis(35)).await;
        scheduler.stop();
        handle.await.unwrap();

        let count = consumer.outcomes.lock().await.len();
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(consumer.outcomes.lock().await.len(), count);
    }
}
