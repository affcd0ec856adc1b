//! `trends`: aggregate every source and print the trend views.

use regwatch_analysis::{build_dataset, summarize, DatasetBuild, SourceFailure, TrendSummary};
use regwatch_core::AppConfig;

use crate::display::truncate;
use crate::sources::document_source;

/// Build the dataset from all sources and print category, date and keyword
/// trends, or the whole summary as JSON.
///
/// An empty dataset prints "insufficient data" and succeeds.
///
/// # Errors
///
/// Returns an error if the client cannot be built or JSON output fails.
pub(crate) async fn run_trends(config: &AppConfig, top: usize, json: bool) -> anyhow::Result<()> {
    let source = document_source(config)?;
    let DatasetBuild { dataset, failures } = build_dataset(&source).await;

    if !failures.is_empty() {
        tracing::warn!(skipped = failures.len(), "dataset built with unreadable sources");
    }
    for failure in &failures {
        eprintln!(
            "warning: skipped {} {}: {}",
            failure.category,
            failure_target(failure),
            failure.reason
        );
    }

    let summary = match summarize(&dataset) {
        Ok(summary) => summary,
        Err(e) => {
            println!("warning: {e}");
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, top);
    }
    Ok(())
}

/// The key that failed, or `(listing)` when the category listing itself failed.
pub(crate) fn failure_target(failure: &SourceFailure) -> &str {
    failure.key.as_deref().unwrap_or("(listing)")
}

fn print_summary(summary: &TrendSummary, top: usize) {
    println!("Records: {}", summary.record_count);
    println!();

    println!("{:<12}COUNT", "CATEGORY");
    for c in &summary.category_counts {
        println!("{:<12}{}", c.category.as_str(), c.count);
    }
    println!();

    let trend = &summary.date_trend;
    if trend.points.is_empty() {
        println!("no parseable dates; date trend unavailable");
    } else {
        println!("{:<12}COUNT", "DATE");
        for point in &trend.points {
            println!("{:<12}{}", point.date.to_string(), point.count);
        }
    }
    if trend.excluded > 0 {
        println!("({} records without a usable date)", trend.excluded);
    }
    println!();

    let keywords = summary.keywords.top(top);
    if keywords.is_empty() {
        println!("no title keywords");
        return;
    }
    let weights = summary.keywords.weights();
    println!("{:<32}{:<8}WEIGHT", "KEYWORD", "COUNT");
    for (k, (_, weight)) in keywords.iter().zip(&weights) {
        println!("{:<32}{:<8}{weight:.2}", truncate(&k.keyword, 28), k.count);
    }
}
