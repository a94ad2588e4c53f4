//! Data models for the gallery service
//!
//! This module defines all the data structures used throughout the application:
//! the raw Notion records we read, the query we send upstream, the normalized
//! gallery items we serve and the response envelope around them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default page number when `page` is missing or invalid
pub const DEFAULT_PAGE: usize = 1;

/// Default page size when `limit` is missing or invalid
pub const DEFAULT_LIMIT: usize = 12;

/// Category value that means "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// A page object as returned by the Notion database query endpoint
///
/// Only the fields the gallery consumes are modelled; everything else in the
/// upstream payload is ignored during deserialization.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RawRecord {
    /// Notion page id (a UUID string)
    #[serde(default)]
    pub id: Option<String>,

    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_time: String,

    /// RFC 3339 last-modified timestamp
    #[serde(default)]
    pub last_edited_time: String,

    /// Named properties of the page; the value shape depends on the column type
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

/// One property value of a Notion page
///
/// Notion tags every property with its column type and only fills the matching
/// field, so the schema is heterogeneous: the same logical column may arrive
/// as rich text, a title, a select or a bare plain-text scalar. Every variant
/// is optional and readers pick whichever is present.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Property {
    #[serde(default)]
    pub rich_text: Option<Vec<TextSegment>>,

    #[serde(default)]
    pub title: Option<Vec<TextSegment>>,

    #[serde(default)]
    pub select: Option<SelectValue>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub checkbox: Option<bool>,

    #[serde(default)]
    pub plain_text: Option<String>,
}

/// A single rich-text or title segment
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TextSegment {
    #[serde(default)]
    pub plain_text: String,
}

/// The selected option of a single-select column
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SelectValue {
    #[serde(default)]
    pub name: String,
}

/// Property filter sent to the Notion query endpoint
///
/// # Example
/// ```json
/// { "property": "Category", "rich_text": { "contains": "Marketing" } }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PropertyFilter {
    pub property: String,
    pub rich_text: TextCondition,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TextCondition {
    pub contains: String,
}

/// Body of one database query call
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<PropertyFilter>,

    /// Number of records per upstream page, at most 100
    pub page_size: u32,

    /// Continuation cursor from the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

/// One page of query results
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct QueryPage {
    #[serde(default)]
    pub results: Vec<RawRecord>,

    #[serde(default)]
    pub has_more: bool,

    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Synthetic engagement numbers attached to every item
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ItemStats {
    pub views: u32,
    pub downloads: u32,
    pub rating: f64,
}

/// A normalized, UI-ready gallery entry
///
/// # Example
/// ```json
/// {
///   "id": "3f1c...",
///   "title": "Launch Checklist",
///   "description": "Everything before go-live",
///   "category": "Marketing",
///   "link": "https://example.com/checklist",
///   "author": "Dana",
///   "created": "2024-03-01T10:00:00.000Z",
///   "last_edited": "2024-03-02T08:30:00.000Z",
///   "stats": { "views": 120345, "downloads": 42, "rating": 4.3 },
///   "tags": ["Marketing"],
///   "isFree": true
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub link: String,
    pub author: String,

    /// Creation timestamp, passed through verbatim
    pub created: String,

    /// Last-edit timestamp, passed through verbatim
    pub last_edited: String,

    /// Not stable across requests; see [`crate::stats::StatsSource`]
    pub stats: ItemStats,

    pub tags: Vec<String>,

    #[serde(rename = "isFree")]
    pub is_free: bool,
}

/// Pagination metadata of a gallery response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Pagination block of the degraded response
    pub fn empty() -> Self {
        Self {
            current_page: DEFAULT_PAGE,
            total_pages: 0,
            total_items: 0,
            items_per_page: DEFAULT_LIMIT,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

/// Response envelope of `GET /api/notion`
///
/// `error` is only present when the pipeline failed; in that case `data` and
/// `categories` are empty and `pagination` is [`Pagination::empty`].
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GalleryResponse {
    pub data: Vec<GalleryItem>,
    pub pagination: Pagination,
    pub categories: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GalleryResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::empty(),
            categories: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// Query parameters of the gallery endpoint
///
/// Everything is taken as a raw string so that a malformed number never
/// turns into a 400; [`GalleryParams::page`] and [`GalleryParams::limit`]
/// map bad input to the defaults instead. A repeated key keeps its first
/// value.
///
/// # Example
/// Query string: `?page=2&limit=24&category=Marketing&search=launch`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GalleryParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl GalleryParams {
    /// Builds the parameters from decoded query pairs
    ///
    /// Unknown keys are ignored; for repeated keys the first value wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "category" => &mut params.category,
                "search" => &mut params.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params
    }

    /// Requested page, `1` unless a positive integer was given
    pub fn page(&self) -> usize {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    /// Requested page size, `12` unless a positive integer was given
    pub fn limit(&self) -> usize {
        parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT)
    }

    /// Category to filter upstream by, if any
    ///
    /// Empty values and the literal `All` mean no filter.
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    /// Search term, if any
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}
