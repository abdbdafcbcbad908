//! Pitcher-vs-batter matchup queries.

use chrono::NaiveDate;
use serde::Serialize;
use statcast_api::types::PitchEvent;
use statcast_api::PitchLogQuery;

use crate::atbat;
use crate::error::DugoutError;
use crate::metrics::{self, OutcomeProbability, OutcomeTotals};
use crate::resolver::PlayerRecord;
use crate::service::DugoutService;
use crate::validation;

/// Resolves both players concurrently, fetches the pitcher's log over the
/// matchup window, and filters it to pitches thrown to the batter.
pub(crate) async fn fetch_matchup(
    service: &DugoutService,
    pitcher: &str,
    batter: &str,
) -> Result<(PlayerRecord, PlayerRecord, Vec<PitchEvent>), DugoutError> {
    let pitcher_name = validation::validate_player_name(pitcher)?;
    let batter_name = validation::validate_player_name(batter)?;
    let (pitcher, batter) = service
        .resolver
        .resolve_pair(&pitcher_name, &batter_name)
        .await?;

    let (start, end) = service.matchup_window();
    let log = service
        .statcast
        .get_pitch_log(&PitchLogQuery::pitcher(pitcher.mlbam_id, start, end))
        .await?;
    let rows: Vec<PitchEvent> = log
        .into_iter()
        .filter(|row| row.batter == batter.mlbam_id)
        .collect();
    Ok((pitcher, batter, rows))
}

/// Head-to-head summary counters.
#[derive(Debug, Serialize)]
pub struct MatchupSummary {
    pub pitcher_name: String,
    pub batter_name: String,
    #[serde(flatten)]
    pub totals: OutcomeTotals,
}

/// Summary stats for a matchup. `None` when the two players have no
/// pitch history against each other.
pub async fn summary(
    service: &DugoutService,
    pitcher: &str,
    batter: &str,
) -> Result<Option<MatchupSummary>, DugoutError> {
    let (pitcher, batter, rows) = fetch_matchup(service, pitcher, batter).await?;
    if rows.is_empty() {
        return Ok(None);
    }
    let at_bats = atbat::reconstruct(&rows);
    Ok(Some(MatchupSummary {
        pitcher_name: pitcher.full_name(),
        batter_name: batter.full_name(),
        totals: metrics::outcome_totals(&at_bats),
    }))
}

/// One pitch of a timeline at-bat.
#[derive(Debug, Serialize)]
pub struct TimelinePitch {
    pub pitch_number: i64,
    pub pitch_name: Option<String>,
    pub release_speed: Option<f64>,
    pub description: Option<String>,
}

/// One at-bat of the matchup timeline.
#[derive(Debug, Serialize)]
pub struct TimelineAtBat {
    pub game_date: NaiveDate,
    pub at_bat_number: i64,
    /// Terminal outcome label, or "in progress".
    pub final_event: String,
    pub pitches: Vec<TimelinePitch>,
}

/// Full at-bat history of the matchup, most recent first. Empty when the
/// players never faced each other.
pub async fn timeline(
    service: &DugoutService,
    pitcher: &str,
    batter: &str,
) -> Result<Vec<TimelineAtBat>, DugoutError> {
    let (_, _, rows) = fetch_matchup(service, pitcher, batter).await?;
    let at_bats = atbat::newest_first(atbat::reconstruct(&rows));
    Ok(at_bats
        .into_iter()
        .map(|ab| TimelineAtBat {
            game_date: ab.game_date,
            at_bat_number: ab.at_bat_number,
            final_event: ab.outcome.display().to_string(),
            pitches: ab
                .pitches
                .iter()
                .map(|p| TimelinePitch {
                    pitch_number: p.pitch_number,
                    pitch_name: p.pitch_name.clone(),
                    release_speed: p.release_speed,
                    description: p.description.clone(),
                })
                .collect(),
        })
        .collect())
}

/// Outcome probability distribution over the matchup's concluded plate
/// appearances. Fails with `InsufficientData` when none have concluded.
pub async fn simulate(
    service: &DugoutService,
    pitcher: &str,
    batter: &str,
) -> Result<Vec<OutcomeProbability>, DugoutError> {
    let (_, _, rows) = fetch_matchup(service, pitcher, batter).await?;
    let at_bats = atbat::reconstruct(&rows);
    let labels = atbat::terminal_labels(&at_bats);
    if labels.is_empty() {
        return Err(DugoutError::InsufficientData(
            "no concluded plate appearances between these players".to_string(),
        ));
    }
    Ok(metrics::outcome_distribution(&labels))
}

/// One point of the pitch-location chart.
#[derive(Debug, Serialize)]
pub struct PitchChartPoint {
    pub plate_x: Option<f64>,
    pub plate_z: Option<f64>,
    pub description: Option<String>,
    pub pitch_name: Option<String>,
    pub release_speed: Option<f64>,
}

/// Plate-crossing locations for every pitch of the matchup.
pub async fn pitch_chart(
    service: &DugoutService,
    pitcher: &str,
    batter: &str,
) -> Result<Vec<PitchChartPoint>, DugoutError> {
    let (_, _, rows) = fetch_matchup(service, pitcher, batter).await?;
    Ok(rows
        .iter()
        .map(|p| PitchChartPoint {
            plate_x: p.plate_x,
            plate_z: p.plate_z,
            description: p.description.clone(),
            pitch_name: p.pitch_name.clone(),
            release_speed: p.release_speed,
        })
        .collect())
}

/// One batted ball of the spray chart.
#[derive(Debug, Serialize)]
pub struct SprayChartPoint {
    pub hc_x: Option<f64>,
    pub hc_y: Option<f64>,
    pub events: Option<String>,
    pub launch_speed: Option<f64>,
    pub launch_angle: Option<f64>,
}

/// Landing coordinates for every ball the batter put in play against the
/// pitcher.
pub async fn spray_chart(
    service: &DugoutService,
    pitcher: &str,
    batter: &str,
) -> Result<Vec<SprayChartPoint>, DugoutError> {
    let (_, _, rows) = fetch_matchup(service, pitcher, batter).await?;
    Ok(rows
        .iter()
        .filter(|p| p.is_in_play())
        .map(|p| SprayChartPoint {
            hc_x: p.hc_x,
            hc_y: p.hc_y,
            events: p.events.clone(),
            launch_speed: p.launch_speed,
            launch_angle: p.launch_angle,
        })
        .collect())
}

/// One fully tracked pitch, for 3D trajectory rendering.
#[derive(Debug, Serialize)]
pub struct TrajectoryPoint {
    pub pitch_type: String,
    pub release_speed: f64,
    pub release_pos_x: f64,
    pub release_pos_y: f64,
    pub release_pos_z: f64,
    pub plate_x: f64,
    pub plate_z: f64,
    pub sz_top: f64,
    pub sz_bot: f64,
}

impl TrajectoryPoint {
    fn from_event(event: &PitchEvent) -> Option<Self> {
        Some(Self {
            pitch_type: event.pitch_type.clone()?,
            release_speed: event.release_speed?,
            release_pos_x: event.release_pos_x?,
            release_pos_y: event.release_pos_y?,
            release_pos_z: event.release_pos_z?,
            plate_x: event.plate_x?,
            plate_z: event.plate_z?,
            sz_top: event.sz_top?,
            sz_bot: event.sz_bot?,
        })
    }
}

/// Trajectory data for every fully tracked pitch of the matchup. Rows
/// missing any tracking field are dropped rather than padded.
pub async fn trajectory(
    service: &DugoutService,
    pitcher: &str,
    batter: &str,
) -> Result<Vec<TrajectoryPoint>, DugoutError> {
    let (_, _, rows) = fetch_matchup(service, pitcher, batter).await?;
    Ok(rows.iter().filter_map(TrajectoryPoint::from_event).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trajectory_point_requires_every_field() {
        let mut event = PitchEvent {
            pitch_type: Some("FF".to_string()),
            release_speed: Some(95.0),
            release_pos_x: Some(-1.2),
            release_pos_y: Some(54.0),
            release_pos_z: Some(5.9),
            plate_x: Some(0.2),
            plate_z: Some(2.5),
            sz_top: Some(3.4),
            sz_bot: Some(1.6),
            ..Default::default()
        };
        assert!(TrajectoryPoint::from_event(&event).is_some());

        event.sz_bot = None;
        assert!(TrajectoryPoint::from_event(&event).is_none());
    }
}
