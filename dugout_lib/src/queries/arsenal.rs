//! Pitcher-centric queries: arsenal, movement, and strategy breakdowns.

use serde::Serialize;
use statcast_api::types::PitchEvent;
use statcast_api::PitchLogQuery;

use crate::error::DugoutError;
use crate::metrics::{self, ArsenalRow, PitchShare, MOVEMENT_FEET_TO_INCHES};
use crate::resolver::Handedness;
use crate::service::DugoutService;
use crate::validation;

async fn fetch_season_log(
    service: &DugoutService,
    pitcher: &str,
) -> Result<Vec<PitchEvent>, DugoutError> {
    let name = validation::validate_player_name(pitcher)?;
    let record = service.resolver.resolve_by_name(&name).await?;
    let (start, end) = service.season_window();
    Ok(service
        .statcast
        .get_pitch_log(&PitchLogQuery::pitcher(record.mlbam_id, start, end))
        .await?)
}

/// Current-season pitch arsenal: per-type usage and characteristics.
/// Empty when the pitcher has thrown no typed pitches this season.
pub async fn arsenal(
    service: &DugoutService,
    pitcher: &str,
) -> Result<Vec<ArsenalRow>, DugoutError> {
    let rows = fetch_season_log(service, pitcher).await?;
    Ok(metrics::pitch_arsenal(&rows))
}

/// One pitch of the movement breakdown, in display inches.
#[derive(Debug, Serialize)]
pub struct MovementPoint {
    pub pitch_name: String,
    pub pfx_x_in: f64,
    pub pfx_z_in: f64,
}

/// Per-pitch movement for the current season. Pitches missing a name or
/// either movement component are dropped.
pub async fn movement(
    service: &DugoutService,
    pitcher: &str,
) -> Result<Vec<MovementPoint>, DugoutError> {
    let rows = fetch_season_log(service, pitcher).await?;
    Ok(rows
        .iter()
        .filter_map(|p| {
            Some(MovementPoint {
                pitch_name: p.pitch_name.clone().filter(|n| !n.is_empty())?,
                pfx_x_in: p.pfx_x? * MOVEMENT_FEET_TO_INCHES,
                pfx_z_in: p.pfx_z? * MOVEMENT_FEET_TO_INCHES,
            })
        })
        .collect())
}

/// League-average movement for one pitch type, in display inches.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LeagueMovement {
    pub pitch_name: &'static str,
    pub pfx_x_in: f64,
    pub pfx_z_in: f64,
}

/// Static league-average movement reference table.
pub const LEAGUE_AVERAGE_MOVEMENT: &[LeagueMovement] = &[
    LeagueMovement { pitch_name: "4-Seam Fastball", pfx_x_in: -5.0, pfx_z_in: 8.5 },
    LeagueMovement { pitch_name: "Sinker", pfx_x_in: -9.0, pfx_z_in: 5.0 },
    LeagueMovement { pitch_name: "Cutter", pfx_x_in: -1.0, pfx_z_in: 7.0 },
    LeagueMovement { pitch_name: "Slider", pfx_x_in: 5.0, pfx_z_in: 1.0 },
    LeagueMovement { pitch_name: "Sweeper", pfx_x_in: 10.0, pfx_z_in: -1.0 },
    LeagueMovement { pitch_name: "Curveball", pfx_x_in: 7.0, pfx_z_in: -6.0 },
    LeagueMovement { pitch_name: "Changeup", pfx_x_in: -8.0, pfx_z_in: 3.0 },
    LeagueMovement { pitch_name: "Split-Finger", pfx_x_in: -6.0, pfx_z_in: 1.5 },
];

/// The league-average movement reference table.
pub fn league_average_movement() -> &'static [LeagueMovement] {
    LEAGUE_AVERAGE_MOVEMENT
}

/// Pitching strategy against a batter's handedness segment.
#[derive(Debug, Serialize)]
pub struct StrategyReport {
    /// Which batter segment was analyzed (e.g. "all left-handed batters").
    pub analysis_target: String,
    /// Pitch-type tendency on the first pitch of an at-bat.
    pub first_pitch: Vec<PitchShare>,
    /// Pitch-type tendency with two strikes.
    pub two_strikes: Vec<PitchShare>,
    /// Pitch types that ended at-bats in strikeouts.
    pub strikeout_pitch: Vec<PitchShare>,
}

/// Strategy breakdown for a pitcher against the given batter's handedness.
///
/// A switch hitter, or a batter whose handedness the directory does not
/// record, widens the analysis to all batters; the report names the
/// segment actually used.
pub async fn strategy(
    service: &DugoutService,
    pitcher: &str,
    batter: &str,
) -> Result<StrategyReport, DugoutError> {
    let pitcher_name = validation::validate_player_name(pitcher)?;
    let batter_name = validation::validate_player_name(batter)?;
    let (pitcher, batter) = service
        .resolver
        .resolve_pair(&pitcher_name, &batter_name)
        .await?;

    let (target_code, analysis_target) = match batter.bats {
        Some(Handedness::Left) => (Some("L"), "all left-handed batters"),
        Some(Handedness::Right) => (Some("R"), "all right-handed batters"),
        Some(Handedness::Switch) | None => (None, "all batters"),
    };

    let (start, end) = service.season_window();
    let log = service
        .statcast
        .get_pitch_log(&PitchLogQuery::pitcher(pitcher.mlbam_id, start, end))
        .await?;

    let segment: Vec<&PitchEvent> = log
        .iter()
        .filter(|row| match target_code {
            Some(code) => row.stand.as_deref() == Some(code),
            None => true,
        })
        .collect();
    if segment.is_empty() {
        return Err(DugoutError::InsufficientData(format!(
            "no pitches against {} this season",
            analysis_target
        )));
    }

    let first_pitch: Vec<&PitchEvent> = segment
        .iter()
        .copied()
        .filter(|row| row.pitch_number == 1)
        .collect();
    let two_strikes: Vec<&PitchEvent> = segment
        .iter()
        .copied()
        .filter(|row| row.strikes == Some(2))
        .collect();
    let strikeout_pitch: Vec<&PitchEvent> = segment
        .iter()
        .copied()
        .filter(|row| row.events.as_deref() == Some("strikeout"))
        .collect();

    Ok(StrategyReport {
        analysis_target: analysis_target.to_string(),
        first_pitch: metrics::pitch_type_shares(&first_pitch),
        two_strikes: metrics::pitch_type_shares(&two_strikes),
        strikeout_pitch: metrics::pitch_type_shares(&strikeout_pitch),
    })
}
