use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use html_escape::decode_html_entities;

use crate::app::{AppContext, ConfluenceError, Result};
use crate::domain::{AggregationResult, Item};
use crate::scheduler::{Consumer, Scheduler};

/// Run the refresh loop until Ctrl-C. Dropping the loop future on Ctrl-C
/// cancels any in-flight pass without publishing a partial result.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let scheduler = Scheduler::new(
        ctx.engine.clone(),
        ctx.config.sources.clone(),
        Arc::new(TerminalConsumer),
        Duration::from_secs(ctx.config.refresh_interval_secs),
    );

    tokio::select! {
        _ = scheduler.run() => {}
        _ = tokio::signal::ctrl_c() => {
            scheduler.stop();
        }
    }

    Ok(())
}

pub async fn once(ctx: &AppContext, json: bool) -> Result<()> {
    let result = ctx.engine.aggregate(&ctx.config.sources).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result)
                .map_err(|e| ConfluenceError::Other(e.to_string()))?
        );
    } else {
        print_result(&result);
    }

    Ok(())
}

pub fn sources(ctx: &AppContext) {
    for source in &ctx.config.sources {
        println!("{:20} {}", source.label, source.url);
    }
}

struct TerminalConsumer;

#[async_trait]
impl Consumer for TerminalConsumer {
    async fn publish(&self, outcome: std::result::Result<AggregationResult, ConfluenceError>) {
        match outcome {
            Ok(result) => print_result(&result),
            // Keep the headline generic; the detail rides along for anyone
            // who cares.
            Err(e) => println!("Error loading news: {e}"),
        }
    }
}

fn print_result(result: &AggregationResult) {
    println!();
    println!(
        "Last updated: {}",
        result.fetched_at.with_timezone(&Local).format("%H:%M")
    );

    for item in &result.items {
        print_item(item, Utc::now());
    }
}

fn print_item(item: &Item, now: DateTime<Utc>) {
    // Entity decoding happens here, at display time, not in the core.
    println!(
        "  {:>12}  [{}] {}",
        format_relative(item.published_at, now),
        item.source_label,
        decode_html_entities(&item.title),
    );
    if !item.link.is_empty() {
        println!("  {:>12}  {}", "", item.link);
    }
}

/// Compact "how long ago" rendering for a publish time.
fn format_relative(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(published) = published else {
        return "unknown".to_string();
    };

    let delta = now.signed_duration_since(published);
    let mins = delta.num_minutes();
    if mins < 1 {
        return "just now".to_string();
    }
    if mins < 60 {
        return format!("{mins}m ago");
    }
    let hours = delta.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = delta.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }
    published.format("%Y-%m-%d").to_string()
}
