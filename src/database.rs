//! Access to the upstream document database
//!
//! This module defines the [`RecordSource`] seam the handler talks to, the
//! application state shared by all handlers, and the paging loop that drains
//! a filtered query into memory.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{PropertyFilter, QueryPage, QueryRequest, RawRecord, TextCondition};
use crate::stats::{RandomStats, StatsSource};

/// Largest page size the Notion query endpoint accepts
pub const UPSTREAM_PAGE_SIZE: u32 = 100;

/// Name of the column the category filter matches against
pub const CATEGORY_PROPERTY: &str = "Category";

/// One paged query against the document database
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<QueryPage>;
}

/// Application state shared across all request handlers
///
/// Built once at startup and never mutated afterwards; cloning only bumps
/// the `Arc` counters.
#[derive(Clone)]
pub struct AppState {
    /// Upstream client, created from configuration at startup
    pub source: Arc<dyn RecordSource>,

    /// Generator for the per-item `stats` block
    pub stats: Arc<dyn StatsSource>,

    /// Optional cap on upstream pages per request
    pub max_pages: Option<usize>,
}

impl AppState {
    /// State with random stats and unbounded paging
    pub fn new<S>(source: S) -> Self
    where
        S: RecordSource + 'static,
    {
        Self {
            source: Arc::new(source),
            stats: Arc::new(RandomStats),
            max_pages: None,
        }
    }

    pub fn with_stats<T>(mut self, stats: T) -> Self
    where
        T: StatsSource + 'static,
    {
        self.stats = Arc::new(stats);
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Contains-filter on the `Category` rich-text column
pub fn category_filter(category: &str) -> PropertyFilter {
    PropertyFilter {
        property: CATEGORY_PROPERTY.to_string(),
        rich_text: TextCondition {
            contains: category.to_string(),
        },
    }
}

/// Follows the continuation cursor until Notion reports no more pages
///
/// Pages are requested one after another since each cursor comes from the
/// previous response. Every record is kept in memory; with `max_pages` set
/// the loop stops early and the result is silently shorter.
///
/// A page claiming `has_more` without a cursor ends the loop, otherwise the
/// next request would restart from the first page forever.
pub async fn fetch_all(
    source: &dyn RecordSource,
    filter: Option<PropertyFilter>,
    max_pages: Option<usize>,
) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        if let Some(cap) = max_pages {
            if pages >= cap {
                warn!(pages, records = records.len(), "upstream page cap reached, results truncated");
                break;
            }
        }

        let request = QueryRequest {
            filter: filter.clone(),
            page_size: UPSTREAM_PAGE_SIZE,
            start_cursor: cursor.take(),
        };

        let page = source.query(&request).await?;
        pages += 1;

        debug!(
            page = pages,
            records = page.results.len(),
            has_more = page.has_more,
            "fetched upstream page"
        );

        records.extend(page.results);

        match (page.has_more, page.next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => break,
        }
    }

    Ok(records)
}
