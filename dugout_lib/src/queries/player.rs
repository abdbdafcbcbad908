//! Player-centric queries: search, basic info, season summary, radar.

use serde::Serialize;

use crate::error::DugoutError;
use crate::fangraphs::{BattingSeason, PitchingSeason};
use crate::league;
use crate::metrics::{self, percentile_rank, percentile_rank_inverted};
use crate::resolver::{PlayerRecord, SearchResult};
use crate::service::DugoutService;
use crate::validation;

/// Fuzzy player search, up to seven candidates with portraits.
///
/// A term shorter than two characters (after sanitization) returns an
/// empty list without contacting any provider.
pub async fn search(
    service: &DugoutService,
    term: &str,
) -> Result<Vec<SearchResult>, DugoutError> {
    let term = validation::sanitize_search(term)?;
    if term.chars().count() < validation::MIN_SEARCH_LENGTH {
        return Ok(Vec::new());
    }
    service.resolver.search(&term).await
}

/// Name and portrait for one player.
#[derive(Debug, Serialize)]
pub struct PlayerInfo {
    pub name: String,
    pub image_url: Option<String>,
}

/// Basic player lookup.
pub async fn info(service: &DugoutService, name: &str) -> Result<PlayerInfo, DugoutError> {
    let name = validation::validate_player_name(name)?;
    let record = service.resolver.resolve_by_name(&name).await?;
    Ok(PlayerInfo {
        name: record.full_name(),
        image_url: record.image_url,
    })
}

/// Season summary, pitcher-shaped or batter-shaped depending on which
/// aggregate table the player appears in.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SeasonSummary {
    Pitcher(PitcherSeasonSummary),
    Batter(BatterSeasonSummary),
}

#[derive(Debug, Serialize)]
pub struct PitcherSeasonSummary {
    pub name: String,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub era: Option<f64>,
    pub strikeouts: Option<i64>,
    pub whip: Option<f64>,
    pub innings: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatterSeasonSummary {
    pub name: String,
    pub avg: Option<f64>,
    pub home_runs: Option<i64>,
    pub rbi: Option<i64>,
    pub obp: Option<f64>,
    pub slg: Option<f64>,
    pub ops: Option<f64>,
    pub image_url: Option<String>,
}

/// Current-season summary for a player. The pitching table is consulted
/// first; a player in neither table is an insufficient-data result,
/// distinct from failing to resolve the player at all.
pub async fn season_summary(
    service: &DugoutService,
    name: &str,
) -> Result<SeasonSummary, DugoutError> {
    let name = validation::validate_player_name(name)?;
    let record = service.resolver.resolve_by_name(&name).await?;
    let season = service.season();

    let pitching = service.league.pitching(season).await?;
    if let Some(row) = find_pitching(&pitching, &record) {
        return Ok(SeasonSummary::Pitcher(PitcherSeasonSummary {
            name: record.full_name(),
            wins: row.wins,
            losses: row.losses,
            era: row.era,
            strikeouts: row.strikeouts,
            whip: row.whip,
            innings: row.innings,
            image_url: record.image_url,
        }));
    }

    let batting = service.league.batting(season).await?;
    if let Some(row) = find_batting(&batting, &record) {
        return Ok(SeasonSummary::Batter(BatterSeasonSummary {
            name: record.full_name(),
            avg: row.avg,
            home_runs: row.home_runs,
            rbi: row.rbi,
            obp: row.obp,
            slg: row.slg,
            ops: row.ops,
            image_url: record.image_url,
        }));
    }

    Err(DugoutError::InsufficientData(format!(
        "{} has no {} season aggregates",
        record.full_name(),
        season
    )))
}

fn find_pitching<'a>(
    table: &'a [PitchingSeason],
    record: &PlayerRecord,
) -> Option<&'a PitchingSeason> {
    table.iter().find(|row| {
        row.mlbam_id == Some(record.mlbam_id) || record.fangraphs_id == Some(row.player_id)
    })
}

fn find_batting<'a>(
    table: &'a [BattingSeason],
    record: &PlayerRecord,
) -> Option<&'a BattingSeason> {
    table.iter().find(|row| {
        row.mlbam_id == Some(record.mlbam_id) || record.fangraphs_id == Some(row.player_id)
    })
}

/// One axis of the percentile radar.
#[derive(Debug, Serialize)]
pub struct RadarAxis {
    pub subject: String,
    /// The player's own value, rounded for display; zero when the
    /// provider omitted the stat.
    pub player_value: f64,
    /// Rank within the qualified population, 0-100. Zero doubles as the
    /// degraded-data sentinel.
    pub percentile: i64,
}

/// Percentile radar, pitcher-shaped or batter-shaped.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RadarSummary {
    Pitcher { data: Vec<RadarAxis> },
    Batter { data: Vec<RadarAxis> },
}

/// Percentile radar for a player against the season's qualified
/// population. The percentile pass runs on a blocking worker so a large
/// season table cannot stall the event loop.
pub async fn radar(service: &DugoutService, name: &str) -> Result<RadarSummary, DugoutError> {
    let name = validation::validate_player_name(name)?;
    let record = service.resolver.resolve_by_name(&name).await?;
    let season = service.season();

    let pitching = service.league.pitching(season).await?;
    if let Some(row) = find_pitching(&pitching, &record) {
        let row = row.clone();
        let table = pitching.clone();
        let data = tokio::task::spawn_blocking(move || pitcher_radar(&row, &table))
            .await
            .expect("radar percentile task panicked");
        return Ok(RadarSummary::Pitcher { data });
    }

    let batting = service.league.batting(season).await?;
    if let Some(row) = find_batting(&batting, &record) {
        let row = row.clone();
        let table = batting.clone();
        let data = tokio::task::spawn_blocking(move || batter_radar(&row, &table))
            .await
            .expect("radar percentile task panicked");
        return Ok(RadarSummary::Batter { data });
    }

    Err(DugoutError::InsufficientData(format!(
        "{} has no {} season aggregates to rank",
        record.full_name(),
        season
    )))
}

fn axis(
    subject: &str,
    value: Option<f64>,
    population: Vec<f64>,
    lower_is_better: bool,
    round: fn(f64) -> f64,
) -> RadarAxis {
    let percentile = if lower_is_better {
        percentile_rank_inverted(value, &population)
    } else {
        percentile_rank(value, &population)
    };
    RadarAxis {
        subject: subject.to_string(),
        player_value: round(value.unwrap_or(0.0)),
        percentile,
    }
}

fn pitcher_radar(row: &PitchingSeason, table: &[PitchingSeason]) -> Vec<RadarAxis> {
    let qualified = league::qualified_pitchers(table);
    let collect = |f: fn(&PitchingSeason) -> Option<f64>| -> Vec<f64> {
        qualified.iter().filter_map(|r| f(r)).collect()
    };
    vec![
        axis(
            "K/9",
            row.k_per_9,
            collect(|r| r.k_per_9),
            false,
            metrics::round2,
        ),
        axis(
            "BB/9",
            row.bb_per_9,
            collect(|r| r.bb_per_9),
            true,
            metrics::round2,
        ),
        axis("WHIP", row.whip, collect(|r| r.whip), true, metrics::round2),
        axis("IP", row.innings, collect(|r| r.innings), false, |v| v),
        axis(
            "GB%",
            row.ground_ball_pct,
            collect(|r| r.ground_ball_pct),
            false,
            metrics::round1,
        ),
    ]
}

fn batter_radar(row: &BattingSeason, table: &[BattingSeason]) -> Vec<RadarAxis> {
    let qualified = league::qualified_batters(table);
    let collect = |f: fn(&BattingSeason) -> Option<f64>| -> Vec<f64> {
        qualified.iter().filter_map(|r| f(r)).collect()
    };
    vec![
        axis("SLG", row.slg, collect(|r| r.slg), false, metrics::round3),
        axis(
            "BB/K",
            row.walk_to_strikeout(),
            collect(|r| r.walk_to_strikeout()),
            false,
            metrics::round2,
        ),
        axis("AVG", row.avg, collect(|r| r.avg), false, metrics::round3),
        axis("OBP", row.obp, collect(|r| r.obp), false, metrics::round3),
        axis("Spd", row.speed, collect(|r| r.speed), false, metrics::round1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitching_rows() -> Vec<PitchingSeason> {
        serde_json::from_value(serde_json::json!([
            {"playerid": 1, "xMLBAMID": 101, "IP": 180.0, "K/9": 11.0, "BB/9": 1.5, "WHIP": 0.95, "GB%": 0.50},
            {"playerid": 2, "xMLBAMID": 102, "IP": 150.0, "K/9": 9.0, "BB/9": 2.5, "WHIP": 1.10, "GB%": 0.45},
            {"playerid": 3, "xMLBAMID": 103, "IP": 30.0, "K/9": 13.0, "BB/9": 1.0, "WHIP": 0.80, "GB%": 0.55}
        ]))
        .unwrap()
    }

    #[test]
    fn pitcher_radar_inverts_lower_is_better_axes() {
        let table = pitching_rows();
        let data = pitcher_radar(&table[0], &table);
        let by_subject = |s: &str| data.iter().find(|a| a.subject == s).unwrap();

        // Row 3 is unqualified (IP 30), so the population is rows 1-2.
        // Best K/9 of the qualified pair.
        assert_eq!(by_subject("K/9").percentile, 100);
        // Best (lowest) BB/9 of the pair: raw rank 50, inverted 50.
        assert_eq!(by_subject("BB/9").percentile, 50);
        assert_eq!(by_subject("BB/9").player_value, 1.5);
        // WHIP 0.95 is the lower of the pair.
        assert_eq!(by_subject("WHIP").percentile, 50);
        assert_eq!(by_subject("IP").percentile, 100);
        assert_eq!(by_subject("GB%").player_value, 50.0);
    }

    #[test]
    fn missing_stat_yields_zero_sentinel() {
        let table: Vec<PitchingSeason> = serde_json::from_value(serde_json::json!([
            {"playerid": 1, "xMLBAMID": 101, "IP": 180.0},
            {"playerid": 2, "xMLBAMID": 102, "IP": 150.0, "K/9": 9.0}
        ]))
        .unwrap();
        let data = pitcher_radar(&table[0], &table);
        let k9 = data.iter().find(|a| a.subject == "K/9").unwrap();
        assert_eq!(k9.player_value, 0.0);
        assert_eq!(k9.percentile, 0);
    }

    #[test]
    fn find_rows_joins_on_either_key() {
        let table = pitching_rows();
        let by_mlbam = PlayerRecord {
            mlbam_id: 102,
            fangraphs_id: None,
            name_first: "a".to_string(),
            name_last: "b".to_string(),
            bats: None,
            team: None,
            image_url: None,
        };
        assert_eq!(find_pitching(&table, &by_mlbam).unwrap().player_id, 2);

        let by_fangraphs = PlayerRecord {
            mlbam_id: 999,
            fangraphs_id: Some(3),
            ..by_mlbam
        };
        assert_eq!(find_pitching(&table, &by_fangraphs).unwrap().player_id, 3);

        let unmatched = PlayerRecord {
            mlbam_id: 999,
            fangraphs_id: None,
            name_first: "a".to_string(),
            name_last: "b".to_string(),
            bats: None,
            team: None,
            image_url: None,
        };
        assert!(find_pitching(&table, &unmatched).is_none());
    }
}
