//! Rolling 7-day league leaderboards.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use statcast_api::types::PitchEvent;
use statcast_api::PitchLogQuery;

use crate::error::DugoutError;
use crate::outcome;
use crate::service::DugoutService;

/// Days of league-wide logs swept for the leaderboard window.
const WINDOW_DAYS: i64 = 7;

/// One leaderboard winner.
#[derive(Debug, Serialize)]
pub struct LeaderEntry {
    pub player_name: String,
    /// Formatted metric value (e.g. "102.4 mph", "5 K's").
    pub value: String,
    pub image_url: Option<String>,
}

/// Leaders over the trailing window.
#[derive(Debug, Serialize)]
pub struct LeaderboardReport {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub fastest_pitch: Option<LeaderEntry>,
    pub hardest_hit: Option<LeaderEntry>,
    pub longest_home_run: Option<LeaderEntry>,
    pub most_strikeouts: Option<LeaderEntry>,
    pub most_hits: Option<LeaderEntry>,
    pub most_home_runs: Option<LeaderEntry>,
}

/// Computes the trailing-week leaderboards from league-wide logs.
///
/// Each day of the window is fetched separately; a day whose fetch fails
/// is skipped rather than failing the sweep. `None` means the whole
/// window produced no pitches. Winners that cannot be resolved through
/// the directory surface as "Unknown" with no portrait.
pub async fn leaderboards(
    service: &DugoutService,
) -> Result<Option<LeaderboardReport>, DugoutError> {
    let today = Utc::now().date_naive();
    let mut rows: Vec<PitchEvent> = Vec::new();
    for offset in 1..=WINDOW_DAYS {
        let day = today - Duration::days(offset);
        match service
            .statcast
            .get_pitch_log(&PitchLogQuery::league(day, day))
            .await
        {
            Ok(mut day_rows) => rows.append(&mut day_rows),
            Err(e) => tracing::warn!("skipping leaderboard day {}: {}", day, e),
        }
    }
    if rows.is_empty() {
        return Ok(None);
    }

    let fastest = max_metric(rows.iter(), |r| r.release_speed, |r| r.pitcher)
        .map(|(id, v)| (id, format!("{:.1} mph", v)));
    let hardest = max_metric(rows.iter(), |r| r.launch_speed, |r| r.batter)
        .map(|(id, v)| (id, format!("{:.1} mph", v)));
    let longest = max_metric(
        rows.iter().filter(|r| r.events.as_deref() == Some("home_run")),
        |r| r.hit_distance_sc,
        |r| r.batter,
    )
    .map(|(id, v)| (id, format!("{:.0} ft", v)));
    let most_strikeouts = count_leader(
        rows.iter().filter(|r| r.events.as_deref() == Some("strikeout")),
        |r| r.pitcher,
    )
    .map(|(id, n)| (id, format!("{} K's", n)));
    let most_hits = count_leader(
        rows.iter()
            .filter(|r| r.events.as_deref().is_some_and(outcome::is_hit_label)),
        |r| r.batter,
    )
    .map(|(id, n)| (id, format!("{} Hits", n)));
    let most_home_runs = count_leader(
        rows.iter().filter(|r| r.events.as_deref() == Some("home_run")),
        |r| r.batter,
    )
    .map(|(id, n)| (id, format!("{} HR", n)));

    // Winners often repeat across boards; the directory memoizes the
    // repeats, and the six lookups run concurrently.
    let (fastest_pitch, hardest_hit, longest_home_run, most_strikeouts, most_hits, most_home_runs) =
        tokio::join!(
            resolve_entry(service, fastest),
            resolve_entry(service, hardest),
            resolve_entry(service, longest),
            resolve_entry(service, most_strikeouts),
            resolve_entry(service, most_hits),
            resolve_entry(service, most_home_runs),
        );

    Ok(Some(LeaderboardReport {
        window_start: today - Duration::days(WINDOW_DAYS),
        window_end: today,
        fastest_pitch,
        hardest_hit,
        longest_home_run,
        most_strikeouts,
        most_hits,
        most_home_runs,
    }))
}

async fn resolve_entry(
    service: &DugoutService,
    winner: Option<(i64, String)>,
) -> Option<LeaderEntry> {
    let (player_id, value) = winner?;
    match service.resolver.resolve_by_id(player_id).await {
        Ok(record) => Some(LeaderEntry {
            player_name: record.full_name(),
            value,
            image_url: record.image_url,
        }),
        Err(e) => {
            tracing::warn!("could not resolve leaderboard player {}: {}", player_id, e);
            Some(LeaderEntry {
                player_name: "Unknown".to_string(),
                value,
                image_url: None,
            })
        }
    }
}

/// The (player, value) pair with the highest metric value. Ties resolve
/// to the higher player id so repeated sweeps stay deterministic.
fn max_metric<'a>(
    rows: impl Iterator<Item = &'a PitchEvent>,
    metric: impl Fn(&PitchEvent) -> Option<f64>,
    player: impl Fn(&PitchEvent) -> i64,
) -> Option<(i64, f64)> {
    rows.filter_map(|r| metric(r).map(|v| (player(r), v)))
        .max_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
}

/// The (player, count) pair with the most matching rows. Ties resolve to
/// the higher player id.
fn count_leader<'a>(
    rows: impl Iterator<Item = &'a PitchEvent>,
    player: impl Fn(&PitchEvent) -> i64,
) -> Option<(i64, usize)> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for row in rows {
        *counts.entry(player(row)).or_default() += 1;
    }
    counts.into_iter().max_by_key(|&(id, n)| (n, id))
}
