//! Aggregation and analysis of scraped regulatory filings.
//!
//! Normalizes per-category JSON documents into a tagged [`Dataset`], derives
//! category, date and keyword trends from it, and classifies document text
//! as a compliance requirement or a market update.

pub mod classify;
pub mod dataset;
pub mod date;
pub mod keywords;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod trends;

pub use classify::{classify, LanguageStructure, COMPLIANCE_KEYWORDS};
pub use dataset::Dataset;
pub use date::{parse_date, DateParseError};
pub use keywords::{count_keywords, keyword_frequency, KeywordCount, KeywordFrequency, MAX_KEYWORDS};
pub use normalize::{normalize_document, DisplayDocument};
pub use pipeline::{build_dataset, latest_updates, DatasetBuild, SourceFailure, UpdatesView};
pub use record::Record;
pub use trends::{
    category_counts, date_trend, summarize, CategoryCount, DateCount, DateTrend, EmptyDataset,
    TrendSummary,
};
