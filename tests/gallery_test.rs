//! Tests for the in-memory query pipeline: normalization, ordering,
//! search, categories and pagination arithmetic.

use serde_json::json;

use gallery::gallery::{categories, normalize, paginate, search, sort_newest_first};
use gallery::model::{GalleryItem, ItemStats, RawRecord};
use gallery::stats::{RandomStats, StatsSource};

struct ZeroStats;

impl StatsSource for ZeroStats {
    fn stats_for(&self, _record: &RawRecord) -> ItemStats {
        ItemStats {
            views: 0,
            downloads: 0,
            rating: 0.0,
        }
    }
}

fn raw(value: serde_json::Value) -> RawRecord {
    serde_json::from_value(value).unwrap()
}

fn item(title: &str, created: &str) -> GalleryItem {
    normalize(
        &raw(json!({
            "id": title,
            "created_time": created,
            "properties": { "Title": { "title": [{ "plain_text": title }] } }
        })),
        0,
        &ZeroStats,
    )
}

fn items(count: usize) -> Vec<GalleryItem> {
    (0..count)
        .map(|i| item(&format!("t{}", i), "2024-01-01T00:00:00Z"))
        .collect()
}

#[test]
fn test_rich_text_wins_over_plain_text() {
    let record = raw(json!({
        "properties": {
            "Category": {
                "rich_text": [{ "plain_text": " Design " }, { "plain_text": "ignored" }],
                "plain_text": "Marketing"
            }
        }
    }));

    assert_eq!(normalize(&record, 0, &ZeroStats).category, "Design");
}

#[test]
fn test_blank_rich_text_falls_back_to_plain_text() {
    let record = raw(json!({
        "properties": {
            "Description": { "rich_text": [{ "plain_text": "   " }], "plain_text": "From scalar" },
            "Author": { "rich_text": [], "plain_text": " Kim " }
        }
    }));

    let normalized = normalize(&record, 0, &ZeroStats);
    assert_eq!(normalized.description, "From scalar");
    assert_eq!(normalized.author, "Kim");
}

#[test]
fn test_select_only_category_is_other() {
    let record = raw(json!({
        "properties": { "Category": { "select": { "name": "Design" } } }
    }));

    assert_eq!(normalize(&record, 0, &ZeroStats).category, "Other");
    assert!(categories(&[record]).is_empty());
}

#[test]
fn test_title_prefers_title_over_name() {
    let record = raw(json!({
        "properties": {
            "Title": { "title": [{ "plain_text": "From Title" }] },
            "Name": { "title": [{ "plain_text": "From Name" }] }
        }
    }));
    assert_eq!(normalize(&record, 4, &ZeroStats).title, "From Title");

    let blank_title = raw(json!({
        "properties": {
            "Title": { "title": [{ "plain_text": "  " }] },
            "Name": { "title": [{ "plain_text": "From Name" }] }
        }
    }));
    assert_eq!(normalize(&blank_title, 4, &ZeroStats).title, "From Name");

    assert_eq!(normalize(&raw(json!({})), 4, &ZeroStats).title, "Item 5");
}

#[test]
fn test_is_free_passes_checkbox_through() {
    let record = raw(json!({ "properties": { "IsFree": { "checkbox": false } } }));
    assert!(!normalize(&record, 0, &ZeroStats).is_free);
}

#[test]
fn test_sort_is_stable_and_puts_bad_timestamps_last() {
    let mut list = vec![
        item("garbage", "not a date"),
        item("first-equal", "2024-01-01T00:00:00.000Z"),
        item("newest", "2024-06-01T00:00:00+02:00"),
        item("second-equal", "2024-01-01T00:00:00.000Z"),
    ];

    sort_newest_first(&mut list);

    let order: Vec<_> = list.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(order, vec!["newest", "first-equal", "second-equal", "garbage"]);
}

#[test]
fn test_search_keeps_order() {
    let list = vec![
        item("Apollo", "2024-01-02T00:00:00Z"),
        item("Zeus", "2024-01-01T00:00:00Z"),
        item("Apophis", "2024-01-01T00:00:00Z"),
    ];

    let found: Vec<_> = search(list, "APO").into_iter().map(|i| i.title).collect();
    assert_eq!(found, vec!["Apollo", "Apophis"]);
}

#[test]
fn test_categories_first_occurrence_order() {
    let records: Vec<RawRecord> = ["Design", "Marketing", " Design", "", "Sales", "Marketing "]
        .iter()
        .map(|c| raw(json!({ "properties": { "Category": { "rich_text": [{ "plain_text": c }] } } })))
        .collect();

    assert_eq!(categories(&records), vec!["Design", "Marketing", "Sales"]);
}

#[test]
fn test_paginate_invariants() {
    for total in [0usize, 1, 11, 12, 13, 25, 36] {
        for limit in [1usize, 5, 12] {
            let total_pages = total.div_ceil(limit);
            for page in 1..=total_pages + 1 {
                let (data, meta) = paginate(items(total), page, limit);

                assert_eq!(meta.total_items, total);
                assert_eq!(meta.total_pages, total_pages);
                assert_eq!(meta.items_per_page, limit);
                assert_eq!(meta.current_page, page);
                assert_eq!(meta.has_next_page, page < total_pages);
                assert_eq!(meta.has_prev_page, page > 1);
                assert!(data.len() <= limit);
                if page < total_pages {
                    assert_eq!(data.len(), limit);
                }
            }
        }
    }
}

#[test]
fn test_paginate_window() {
    let (data, _) = paginate(items(10), 2, 4);

    let titles: Vec<_> = data.into_iter().map(|i| i.title).collect();
    assert_eq!(titles, vec!["t4", "t5", "t6", "t7"]);
}

#[test]
fn test_paginate_huge_page_does_not_overflow() {
    let (data, meta) = paginate(items(3), usize::MAX, 12);

    assert!(data.is_empty());
    assert_eq!(meta.total_pages, 1);
    assert!(!meta.has_next_page);
}

#[test]
fn test_random_stats_ranges() {
    let record = RawRecord::default();

    for _ in 0..500 {
        let stats = RandomStats.stats_for(&record);
        assert!((10_000..510_000).contains(&stats.views));
        assert!((1..=100).contains(&stats.downloads));
        assert!((3.0..=5.0).contains(&stats.rating));
        assert_eq!((stats.rating * 10.0).round() / 10.0, stats.rating);
    }
}
