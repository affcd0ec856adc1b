//! `updates`: the latest document for one category.

use regwatch_analysis::{latest_updates, DisplayDocument, UpdatesView};
use regwatch_core::AppConfig;

use crate::display::render_table;
use crate::sources::{document_source, resolve_category};

/// Fields too long for the table view.
const HIDDEN_COLUMNS: &[&str] = &["content"];

/// Show up to `limit` records from the latest document of `category`.
///
/// A category with no readable document prints a warning and succeeds.
///
/// # Errors
///
/// Returns an error if the client cannot be built or `category` is unknown.
pub(crate) async fn run_updates(config: &AppConfig, category: &str, limit: usize) -> anyhow::Result<()> {
    let source = document_source(config)?;
    let category = resolve_category(source.catalog(), category)?;

    match latest_updates(&source, &category, limit).await {
        UpdatesView::NoData { category, reason } => {
            println!("warning: {} ({category})", UpdatesView::NO_DATA_MESSAGE);
            if let Some(reason) = reason {
                println!("  reason: {reason}");
            }
        }
        UpdatesView::Latest {
            category,
            key,
            display,
        } => {
            println!("Latest {category} update: {key}");
            println!();
            print_display(&display)?;
        }
    }

    Ok(())
}

pub(crate) fn print_display(display: &DisplayDocument) -> anyhow::Result<()> {
    match display {
        DisplayDocument::Table(records) if records.is_empty() => {
            println!("(document has no records)");
        }
        DisplayDocument::Table(records) => {
            let columns = display.columns_without(HIDDEN_COLUMNS);
            for line in render_table(&columns, records) {
                println!("{line}");
            }
        }
        DisplayDocument::Opaque(value) => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
