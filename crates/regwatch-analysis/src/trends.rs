//! Category, date and keyword trend views over a [`Dataset`].

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use regwatch_core::Category;
use serde::Serialize;
use thiserror::Error;

use crate::dataset::Dataset;
use crate::keywords::{keyword_frequency, KeywordFrequency};

/// The dataset has no records, so no trend can be computed.
///
/// A terminal state rather than a failure: callers check for it before
/// asking for date or keyword views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient data: the dataset has no records")]
pub struct EmptyDataset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Records per day, ascending by date, one point per distinct date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateTrend {
    pub points: Vec<DateCount>,
    /// Records left out because their date was missing or unparseable.
    pub excluded: usize,
}

impl DateTrend {
    /// Sum of all per-day counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.points.iter().map(|p| p.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSummary {
    pub record_count: usize,
    pub category_counts: Vec<CategoryCount>,
    pub date_trend: DateTrend,
    pub keywords: KeywordFrequency,
}

/// Count records per category, most frequent first; ties keep the order in
/// which categories first appear in the dataset.
#[must_use]
pub fn category_counts(dataset: &Dataset) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&Category, usize> = HashMap::new();

    for record in dataset {
        let category = record.category();
        if let Some(&i) = index.get(category) {
            counts[i].count += 1;
        } else {
            index.insert(category, counts.len());
            counts.push(CategoryCount {
                category: category.clone(),
                count: 1,
            });
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Count records per calendar day.
///
/// Records whose `date` is missing or does not parse are excluded entirely
/// and tallied in [`DateTrend::excluded`].
#[must_use]
pub fn date_trend(dataset: &Dataset) -> DateTrend {
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut excluded = 0;

    for record in dataset {
        match record.date() {
            Ok(date) => *by_day.entry(date).or_insert(0) += 1,
            Err(e) => {
                tracing::trace!(category = %record.category(), error = %e, "record excluded from date trend");
                excluded += 1;
            }
        }
    }

    DateTrend {
        points: by_day
            .into_iter()
            .map(|(date, count)| DateCount { date, count })
            .collect(),
        excluded,
    }
}

/// Compute every trend view for `dataset`.
///
/// # Errors
///
/// Returns [`EmptyDataset`] when the dataset has no records; no date or
/// keyword work is attempted in that case.
pub fn summarize(dataset: &Dataset) -> Result<TrendSummary, EmptyDataset> {
    if dataset.is_empty() {
        return Err(EmptyDataset);
    }

    let summary = TrendSummary {
        record_count: dataset.len(),
        category_counts: category_counts(dataset),
        date_trend: date_trend(dataset),
        keywords: keyword_frequency(dataset),
    };

    tracing::info!(
        records = summary.record_count,
        categories = summary.category_counts.len(),
        days = summary.date_trend.points.len(),
        undated = summary.date_trend.excluded,
        keywords = summary.keywords.keywords().len(),
        "trend summary computed"
    );
    Ok(summary)
}
