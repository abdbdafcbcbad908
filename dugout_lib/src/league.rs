//! Cached season aggregate tables and qualification thresholds.

use std::sync::Arc;

use crate::cache::BoundedCache;
use crate::error::DugoutError;
use crate::fangraphs::{BattingSeason, FangraphsClient, PitchingSeason};

/// Minimum innings pitched for a pitcher to enter percentile populations.
pub const QUALIFIED_MIN_INNINGS: f64 = 40.0;
/// Minimum plate appearances for a batter to enter percentile populations.
pub const QUALIFIED_MIN_PA: i64 = 100;

/// Season tables cached at once. A third distinct (category, year) evicts
/// the oldest.
const SEASON_CACHE_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum StatCategory {
    Batting,
    Pitching,
}

#[derive(Clone)]
enum SeasonTable {
    Pitching(Arc<Vec<PitchingSeason>>),
    Batting(Arc<Vec<BattingSeason>>),
}

/// Lazily fetched, process-lifetime cache of league-wide season tables.
///
/// Tables are fetched on first request for a (category, year) pair and
/// never invalidated until evicted. Concurrent misses on the same key may
/// both fetch; both compute the same snapshot, so the last insert winning
/// is harmless. Cache bookkeeping itself is serialized inside
/// [`BoundedCache`].
pub struct LeagueStats {
    client: FangraphsClient,
    cache: BoundedCache<(StatCategory, i32), SeasonTable>,
}

impl LeagueStats {
    pub fn new(client: FangraphsClient) -> Self {
        Self {
            client,
            cache: BoundedCache::new(SEASON_CACHE_CAPACITY),
        }
    }

    /// The pitching table for a season, shared via `Arc`.
    pub async fn pitching(&self, year: i32) -> Result<Arc<Vec<PitchingSeason>>, DugoutError> {
        let key = (StatCategory::Pitching, year);
        if let Some(SeasonTable::Pitching(table)) = self.cache.get(&key) {
            return Ok(table);
        }
        tracing::info!("season cache miss: downloading {} pitching aggregates", year);
        let table = Arc::new(self.client.get_pitching(year).await?);
        self.cache.insert(key, SeasonTable::Pitching(table.clone()));
        Ok(table)
    }

    /// The batting table for a season, shared via `Arc`.
    pub async fn batting(&self, year: i32) -> Result<Arc<Vec<BattingSeason>>, DugoutError> {
        let key = (StatCategory::Batting, year);
        if let Some(SeasonTable::Batting(table)) = self.cache.get(&key) {
            return Ok(table);
        }
        tracing::info!("season cache miss: downloading {} batting aggregates", year);
        let table = Arc::new(self.client.get_batting(year).await?);
        self.cache.insert(key, SeasonTable::Batting(table.clone()));
        Ok(table)
    }

    /// Live cache entries, for eviction tests.
    pub fn cached_tables(&self) -> usize {
        self.cache.len()
    }
}

/// Pitchers meeting the innings threshold.
pub fn qualified_pitchers(table: &[PitchingSeason]) -> Vec<&PitchingSeason> {
    table
        .iter()
        .filter(|row| row.innings.is_some_and(|ip| ip >= QUALIFIED_MIN_INNINGS))
        .collect()
}

/// Batters meeting the plate-appearance threshold.
pub fn qualified_batters(table: &[BattingSeason]) -> Vec<&BattingSeason> {
    table
        .iter()
        .filter(|row| {
            row.plate_appearances
                .is_some_and(|pa| pa >= QUALIFIED_MIN_PA)
        })
        .collect()
}
