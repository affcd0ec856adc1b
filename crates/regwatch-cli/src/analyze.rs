//! `analyze`: sentiment, entities and language structure for one text.

use regwatch_analysis::{latest_updates, DisplayDocument, UpdatesView};
use regwatch_core::AppConfig;
use regwatch_nlp::{inspect, ComprehendClient, SentimentBridge};

use crate::display::truncate;
use crate::sources::{document_source, resolve_category};
use crate::updates::print_display;

/// Pick the `index`-th content text of `category`'s latest document and
/// analyse it.
///
/// Missing data, a missing `content` field and an out-of-range index print a
/// warning and succeed. Analysis failures show as the `Error` sentinel.
///
/// # Errors
///
/// Returns an error if a client cannot be built or `category` is unknown.
pub(crate) async fn run_analyze(config: &AppConfig, category: &str, index: usize) -> anyhow::Result<()> {
    let source = document_source(config)?;
    let category = resolve_category(source.catalog(), category)?;

    let display = match latest_updates(&source, &category, config.preview_limit).await {
        UpdatesView::NoData { .. } => {
            println!("warning: no JSON documents found for {category}");
            return Ok(());
        }
        UpdatesView::Latest { display, .. } => display,
    };

    if matches!(display, DisplayDocument::Opaque(_)) {
        print_display(&display)?;
        return Ok(());
    }
    if !display.has_column("content") {
        println!("warning: no 'content' field found in the {category} data");
        return Ok(());
    }

    let texts = display.content_texts();
    let Some(text) = texts.get(index) else {
        println!(
            "warning: index {index} out of range; {} content texts available",
            texts.len()
        );
        return Ok(());
    };

    println!("Candidates:");
    for (i, t) in texts.iter().enumerate() {
        let marker = if i == index { '*' } else { ' ' };
        println!("{marker} [{i}] {}", truncate(&t.replace('\n', " "), 70));
    }
    println!();

    let analytics = ComprehendClient::new(
        &config.analytics_endpoint,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build analytics client: {e}"))?;
    let bridge = SentimentBridge::new(analytics, config.language_code.clone());

    let insight = inspect(&bridge, text).await;
    println!("Sentiment: {}", insight.sentiment.sentiment);
    println!("Entities: {:?}", insight.sentiment.entities);
    println!("Language Structure: {}", insight.structure);

    Ok(())
}
