//! The gallery query pipeline
//!
//! Everything here is pure and synchronous: the handler fetches raw records
//! and hands them over, this module turns them into the response envelope.
//!
//! normalize → sort → search → categories → paginate

use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};

use crate::model::{GalleryItem, GalleryParams, GalleryResponse, Pagination, RawRecord};
use crate::stats::StatsSource;

pub const FALLBACK_DESCRIPTION: &str = "No description available";
pub const FALLBACK_CATEGORY: &str = "Other";
pub const FALLBACK_AUTHOR: &str = "Anonymous";
pub const FALLBACK_LINK: &str = "#";

/// Runs the whole in-memory pipeline over one request's records
pub fn build_response(
    records: &[RawRecord],
    params: &GalleryParams,
    stats: &dyn StatsSource,
) -> GalleryResponse {
    let mut items: Vec<GalleryItem> = records
        .iter()
        .enumerate()
        .map(|(position, record)| normalize(record, position, stats))
        .collect();

    sort_newest_first(&mut items);

    let items = match params.search_term() {
        Some(term) => search(items, term),
        None => items,
    };

    let (data, pagination) = paginate(items, params.page(), params.limit());

    GalleryResponse {
        data,
        pagination,
        categories: categories(records),
        error: None,
    }
}

/// Flattens one record into a gallery item
///
/// `position` is the record's index in fetch order and only feeds the
/// fallback id and title.
pub fn normalize(record: &RawRecord, position: usize, stats: &dyn StatsSource) -> GalleryItem {
    let category = raw_category(record).unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

    let title = title_text(record, "Title")
        .or_else(|| title_text(record, "Name"))
        .unwrap_or_else(|| format!("Item {}", position + 1));

    let id = record
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("notion-{}", position));

    let link = record
        .properties
        .get("Link")
        .and_then(|p| p.url.clone())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| FALLBACK_LINK.to_string());

    let is_free = record
        .properties
        .get("IsFree")
        .and_then(|p| p.checkbox)
        .unwrap_or(true);

    GalleryItem {
        id,
        title,
        description: text_value(record, "Description")
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
        tags: vec![category.clone()],
        category,
        link,
        author: text_value(record, "Author").unwrap_or_else(|| FALLBACK_AUTHOR.to_string()),
        created: record.created_time.clone(),
        last_edited: record.last_edited_time.clone(),
        stats: stats.stats_for(record),
        is_free,
    }
}

/// Category as stored upstream, before the `Other` fallback
pub fn raw_category(record: &RawRecord) -> Option<String> {
    text_value(record, "Category")
}

/// First rich-text segment, then a bare `plain_text` scalar
///
/// Blank values fall through to the next shape.
fn text_value(record: &RawRecord, name: &str) -> Option<String> {
    let property = record.properties.get(name)?;

    property
        .rich_text
        .as_ref()
        .and_then(|segments| segments.first())
        .and_then(|segment| trimmed(&segment.plain_text))
        .or_else(|| property.plain_text.as_deref().and_then(trimmed))
}

fn title_text(record: &RawRecord, name: &str) -> Option<String> {
    record
        .properties
        .get(name)?
        .title
        .as_ref()?
        .first()
        .and_then(|segment| trimmed(&segment.plain_text))
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Most recently created first
///
/// Stable for equal timestamps. Timestamps that do not parse as RFC 3339
/// sort after all valid ones.
pub fn sort_newest_first(items: &mut [GalleryItem]) {
    items.sort_by_cached_key(|item| Reverse(parse_timestamp(&item.created)));
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// Keeps items whose title, description, category or author contain `term`,
/// ignoring case
pub fn search(items: Vec<GalleryItem>, term: &str) -> Vec<GalleryItem> {
    let needle = term.to_lowercase();

    items
        .into_iter()
        .filter(|item| {
            [&item.title, &item.description, &item.category, &item.author]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Distinct upstream categories in order of first appearance
///
/// Computed from every fetched record, so the search term never narrows it.
pub fn categories(records: &[RawRecord]) -> Vec<String> {
    let mut seen = HashSet::new();

    records
        .iter()
        .filter_map(raw_category)
        .filter(|category| seen.insert(category.clone()))
        .collect()
}

/// Cuts one page out of the filtered items
///
/// `page` and `limit` are expected to be at least 1. A page past the end
/// yields no data but still reports the real totals.
pub fn paginate(
    items: Vec<GalleryItem>,
    page: usize,
    limit: usize,
) -> (Vec<GalleryItem>, Pagination) {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(limit);
    let start = page.saturating_sub(1).saturating_mul(limit);

    let data = items.into_iter().skip(start).take(limit).collect();

    let pagination = Pagination {
        current_page: page,
        total_pages,
        total_items,
        items_per_page: limit,
        has_next_page: page < total_pages,
        has_prev_page: page > 1,
    };

    (data, pagination)
}
