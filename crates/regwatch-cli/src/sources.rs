//! Source catalog resolution shared by every subcommand.

use regwatch_core::{AppConfig, Category, SourceCatalog};
use regwatch_store::{DocumentSource, S3Client};

/// Build the document source for this run from the configured store and catalog.
///
/// # Errors
///
/// Returns an error if the sources file cannot be loaded or the store
/// endpoint is invalid.
pub(crate) fn document_source(config: &AppConfig) -> anyhow::Result<DocumentSource<S3Client>> {
    let catalog = config.source_catalog()?;
    let store = S3Client::new(
        &config.store_endpoint,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build object store client: {e}"))?;
    Ok(DocumentSource::new(store, catalog))
}

/// Look up `name` in the catalog, ignoring ASCII case.
///
/// # Errors
///
/// Returns an error naming the available categories when `name` is unknown.
pub(crate) fn resolve_category(catalog: &SourceCatalog, name: &str) -> anyhow::Result<Category> {
    catalog.find(name).cloned().ok_or_else(|| {
        let known: Vec<&str> = catalog.categories().map(Category::as_str).collect();
        anyhow::anyhow!(
            "unknown category '{name}'; expected one of: {}",
            known.join(", ")
        )
    })
}

/// Print the configured categories and their prefixes.
///
/// # Errors
///
/// Returns an error if the sources file cannot be loaded.
pub(crate) fn run_categories(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = config.source_catalog()?;

    println!("Bucket: {}", catalog.bucket());
    println!();
    println!("{:<12}PREFIX", "CATEGORY");
    for entry in catalog.entries() {
        println!("{:<12}{}", entry.category.as_str(), entry.prefix);
    }
    Ok(())
}
