//! One fresh aggregation pass over every configured source.

use regwatch_core::Category;
use regwatch_store::{DocumentSource, FetchError, LatestSelector, ObjectStore};

use crate::dataset::Dataset;
use crate::normalize::DisplayDocument;

/// A listing or fetch that was skipped during a dataset build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub category: Category,
    /// `None` when listing the category itself failed.
    pub key: Option<String>,
    pub reason: String,
}

/// The combined dataset plus whatever could not be read while building it.
#[derive(Debug, Clone, Default)]
pub struct DatasetBuild {
    pub dataset: Dataset,
    pub failures: Vec<SourceFailure>,
}

/// Build the combined dataset from every category in catalog order.
///
/// Keys are fetched in listing order. A failed listing or fetch is logged,
/// recorded in [`DatasetBuild::failures`], and skipped; the pass always
/// completes.
pub async fn build_dataset<S, L>(source: &DocumentSource<S, L>) -> DatasetBuild
where
    S: ObjectStore,
    L: LatestSelector,
{
    let mut build = DatasetBuild::default();

    for category in source.catalog().categories() {
        let keys = match source.list_documents(category).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(category = %category, error = %e, "listing failed, skipping category");
                build.failures.push(SourceFailure {
                    category: category.clone(),
                    key: None,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let mut added = 0;
        for key in &keys {
            match source.fetch_document(key).await {
                Ok(document) => added += build.dataset.extend_from_document(category, &document),
                Err(e) => {
                    tracing::warn!(category = %category, key = %key, error = %e, "fetch failed, skipping document");
                    build.failures.push(SourceFailure {
                        category: category.clone(),
                        key: Some(key.clone()),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(category = %category, documents = keys.len(), records = added, "category aggregated");
    }

    build
}

/// What to show for a category's most recent document.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdatesView {
    /// Nothing listed, or the latest document could not be read.
    NoData {
        category: Category,
        reason: Option<String>,
    },
    Latest {
        category: Category,
        key: String,
        display: DisplayDocument,
    },
}

impl UpdatesView {
    pub const NO_DATA_MESSAGE: &'static str = "no data available for this category";

    #[must_use]
    pub fn category(&self) -> &Category {
        match self {
            Self::NoData { category, .. } | Self::Latest { category, .. } => category,
        }
    }
}

/// Fetch the latest document for `category` and prepare its first `limit`
/// elements for display.
///
/// Every [`FetchError`] is contained here and becomes [`UpdatesView::NoData`].
pub async fn latest_updates<S, L>(
    source: &DocumentSource<S, L>,
    category: &Category,
    limit: usize,
) -> UpdatesView
where
    S: ObjectStore,
    L: LatestSelector,
{
    match source.latest_document(category).await {
        Ok(Some(latest)) => UpdatesView::Latest {
            display: DisplayDocument::from_raw(&latest.category, latest.document, limit),
            category: latest.category,
            key: latest.key,
        },
        Ok(None) => {
            tracing::info!(category = %category, "no documents listed");
            UpdatesView::NoData {
                category: category.clone(),
                reason: None,
            }
        }
        Err(e) => no_data_after(category, &e),
    }
}

fn no_data_after(category: &Category, error: &FetchError) -> UpdatesView {
    tracing::warn!(category = %category, error = %error, "latest document unavailable");
    UpdatesView::NoData {
        category: category.clone(),
        reason: Some(error.to_string()),
    }
}
