//! Engagement numbers attached to gallery items
//!
//! Notion has no view or download counters, so the service makes them up.
//! The generator sits behind [`StatsSource`] so a real metrics backend can
//! replace it without touching the query pipeline.

use rand::Rng;

use crate::model::{ItemStats, RawRecord};

/// Supplies the `stats` block for one record
pub trait StatsSource: Send + Sync {
    fn stats_for(&self, record: &RawRecord) -> ItemStats;
}

/// Random numbers in plausible ranges
///
/// Values are drawn fresh on every call, so two requests for the same record
/// report different stats.
///
/// - views: 10 000 ..= 509 999
/// - downloads: 1 ..= 100
/// - rating: 3.0 ..= 5.0, one decimal
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomStats;

impl StatsSource for RandomStats {
    fn stats_for(&self, _record: &RawRecord) -> ItemStats {
        let mut rng = rand::rng();
        let rating: f64 = rng.random::<f64>() * 2.0 + 3.0;

        ItemStats {
            views: rng.random_range(10_000..510_000),
            downloads: rng.random_range(1..=100),
            rating: (rating * 10.0).round() / 10.0,
        }
    }
}
