//! Benchmark tests for the query pipeline
//!
//! Run with: cargo test --release -- --nocapture bench

use std::time::Instant;

use serde_json::json;

use gallery::gallery::build_response;
use gallery::model::{GalleryParams, RawRecord};
use gallery::stats::RandomStats;

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(),
{
    let start = Instant::now();

    for _ in 0..iterations {
        f();
    }

    let duration = start.elapsed();
    let avg_ms = duration.as_millis() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

fn records(count: usize) -> Vec<RawRecord> {
    (0..count)
        .map(|i| {
            serde_json::from_value(json!({
                "id": format!("page-{}", i),
                "created_time": format!("2024-01-01T00:00:{:02}.{:03}Z", i % 60, i % 1000),
                "last_edited_time": "2024-01-02T00:00:00.000Z",
                "properties": {
                    "Title": { "title": [{ "plain_text": format!("Template {}", i) }] },
                    "Description": { "rich_text": [{ "plain_text": "A reusable layout" }] },
                    "Category": { "rich_text": [{ "plain_text": format!("Category {}", i % 15) }] },
                    "Author": { "rich_text": [{ "plain_text": "Dana" }] }
                }
            }))
            .unwrap()
        })
        .collect()
}

#[test]
#[ignore] // Run explicitly with: cargo test bench --release -- --ignored --nocapture
fn bench_build_response() {
    println!("\n=== Benchmark: Build gallery response ===\n");

    for size in [1_000, 10_000] {
        let records = records(size);

        let params = GalleryParams::default();
        benchmark(&format!("{} records, no search", size), 50, || {
            let response = build_response(&records, &params, &RandomStats);
            assert_eq!(response.pagination.total_items, size);
        });

        let params = GalleryParams {
            search: Some("template 9".to_string()),
            page: Some("2".to_string()),
            ..Default::default()
        };
        benchmark(&format!("{} records, search", size), 50, || {
            let response = build_response(&records, &params, &RandomStats);
            assert!(response.pagination.total_items > 0);
        });
    }
}
