use anyhow::Result;
use serde::Serialize;
use tabled::{Table, Tabled};

use dugout_lib::metrics::{ArsenalRow, OutcomeProbability, PitchShare};
use dugout_lib::queries::arsenal::{LeagueMovement, MovementPoint, StrategyReport};
use dugout_lib::queries::leaderboard::LeaderboardReport;
use dugout_lib::queries::matchup::{
    MatchupSummary, PitchChartPoint, SprayChartPoint, TimelineAtBat, TrajectoryPoint,
};
use dugout_lib::queries::player::{RadarAxis, SeasonSummary};
use dugout_lib::SearchResult;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            "csv" => Self::Csv,
            _ => Self::Table,
        }
    }
}

fn fmt_opt_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn fmt_opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

// -- Generic printers --

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn print_table<R: Tabled>(rows: Vec<R>) {
    if rows.is_empty() {
        println!("(no rows)");
        return;
    }
    println!("{}", Table::new(rows));
}

fn print_csv<R: Serialize>(rows: &[R]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders row-shaped data in the requested format. `raw` is what JSON
/// output serializes; `rows` feed the table and CSV renderings.
pub fn render<T: Serialize, R: Tabled + Serialize>(
    format: &OutputFormat,
    raw: &T,
    rows: Vec<R>,
) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Json => print_json(raw),
        OutputFormat::Csv => print_csv(&rows)?,
    }
    Ok(())
}

// -- Row shapes --

#[derive(Tabled, Serialize)]
pub struct SearchRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "MLBAM ID")]
    #[serde(rename = "MLBAM ID")]
    mlbam_id: i64,
    #[tabled(rename = "Portrait")]
    #[serde(rename = "Portrait")]
    portrait: String,
}

pub fn search_rows(results: &[SearchResult]) -> Vec<SearchRow> {
    results
        .iter()
        .map(|r| SearchRow {
            name: r.name.clone(),
            mlbam_id: r.mlbam_id,
            portrait: fmt_opt_str(&r.image_url),
        })
        .collect()
}

#[derive(Tabled, Serialize)]
pub struct StatRow {
    #[tabled(rename = "Stat")]
    #[serde(rename = "Stat")]
    stat: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

fn stat_row(stat: &str, value: String) -> StatRow {
    StatRow {
        stat: stat.to_string(),
        value,
    }
}

pub fn season_summary_rows(summary: &SeasonSummary) -> Vec<StatRow> {
    match summary {
        SeasonSummary::Pitcher(p) => vec![
            stat_row("Player", p.name.clone()),
            stat_row("W", fmt_opt_i64(p.wins)),
            stat_row("L", fmt_opt_i64(p.losses)),
            stat_row("ERA", fmt_opt_f64(p.era)),
            stat_row("SO", fmt_opt_i64(p.strikeouts)),
            stat_row("WHIP", fmt_opt_f64(p.whip)),
            stat_row("IP", fmt_opt_f64(p.innings)),
        ],
        SeasonSummary::Batter(b) => vec![
            stat_row("Player", b.name.clone()),
            stat_row("AVG", fmt_opt_f64(b.avg)),
            stat_row("HR", fmt_opt_i64(b.home_runs)),
            stat_row("RBI", fmt_opt_i64(b.rbi)),
            stat_row("OBP", fmt_opt_f64(b.obp)),
            stat_row("SLG", fmt_opt_f64(b.slg)),
            stat_row("OPS", fmt_opt_f64(b.ops)),
        ],
    }
}

fn fmt_opt_i64(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn matchup_summary_rows(summary: &MatchupSummary) -> Vec<StatRow> {
    vec![
        stat_row("Pitcher", summary.pitcher_name.clone()),
        stat_row("Batter", summary.batter_name.clone()),
        stat_row("PA", summary.totals.total_pa.to_string()),
        stat_row("AB", summary.totals.at_bats.to_string()),
        stat_row("H", summary.totals.hits.to_string()),
        stat_row("K", summary.totals.strikeouts.to_string()),
        stat_row("BB", summary.totals.walks.to_string()),
        stat_row("HR", summary.totals.home_runs.to_string()),
        stat_row("AVG", format!("{:.3}", summary.totals.batting_average)),
    ]
}

#[derive(Tabled, Serialize)]
pub struct DistributionRow {
    #[tabled(rename = "Outcome")]
    #[serde(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Probability %")]
    #[serde(rename = "Probability %")]
    probability: f64,
}

pub fn distribution_rows(distribution: &[OutcomeProbability]) -> Vec<DistributionRow> {
    distribution
        .iter()
        .map(|e| DistributionRow {
            outcome: e.outcome.clone(),
            probability: e.probability,
        })
        .collect()
}

#[derive(Tabled, Serialize)]
pub struct ArsenalTableRow {
    #[tabled(rename = "Pitch")]
    #[serde(rename = "Pitch")]
    pitch: String,
    #[tabled(rename = "Count")]
    #[serde(rename = "Count")]
    count: usize,
    #[tabled(rename = "Usage %")]
    #[serde(rename = "Usage %")]
    usage: f64,
    #[tabled(rename = "Avg mph")]
    #[serde(rename = "Avg mph")]
    avg_speed: String,
    #[tabled(rename = "Max mph")]
    #[serde(rename = "Max mph")]
    max_speed: String,
    #[tabled(rename = "Avg Spin")]
    #[serde(rename = "Avg Spin")]
    avg_spin: String,
    #[tabled(rename = "H-Brk in")]
    #[serde(rename = "H-Brk in")]
    pfx_x: String,
    #[tabled(rename = "V-Brk in")]
    #[serde(rename = "V-Brk in")]
    pfx_z: String,
}

pub fn arsenal_rows(arsenal: &[ArsenalRow]) -> Vec<ArsenalTableRow> {
    arsenal
        .iter()
        .map(|r| ArsenalTableRow {
            pitch: r.pitch_name.clone(),
            count: r.usage,
            usage: r.usage_percentage,
            avg_speed: fmt_opt_f64(r.avg_speed),
            max_speed: fmt_opt_f64(r.max_speed),
            avg_spin: fmt_opt_f64(r.avg_spin),
            pfx_x: fmt_opt_f64(r.avg_pfx_x),
            pfx_z: fmt_opt_f64(r.avg_pfx_z),
        })
        .collect()
}

#[derive(Tabled, Serialize)]
pub struct MovementRow {
    #[tabled(rename = "Pitch")]
    #[serde(rename = "Pitch")]
    pitch: String,
    #[tabled(rename = "H-Brk in")]
    #[serde(rename = "H-Brk in")]
    pfx_x: f64,
    #[tabled(rename = "V-Brk in")]
    #[serde(rename = "V-Brk in")]
    pfx_z: f64,
}

pub fn movement_rows(points: &[MovementPoint]) -> Vec<MovementRow> {
    points
        .iter()
        .map(|p| MovementRow {
            pitch: p.pitch_name.clone(),
            pfx_x: p.pfx_x_in,
            pfx_z: p.pfx_z_in,
        })
        .collect()
}

pub fn league_movement_rows(reference: &[LeagueMovement]) -> Vec<MovementRow> {
    reference
        .iter()
        .map(|p| MovementRow {
            pitch: p.pitch_name.to_string(),
            pfx_x: p.pfx_x_in,
            pfx_z: p.pfx_z_in,
        })
        .collect()
}

#[derive(Tabled, Serialize)]
pub struct RadarRow {
    #[tabled(rename = "Stat")]
    #[serde(rename = "Stat")]
    stat: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: f64,
    #[tabled(rename = "Percentile")]
    #[serde(rename = "Percentile")]
    percentile: i64,
}

pub fn radar_rows(axes: &[RadarAxis]) -> Vec<RadarRow> {
    axes.iter()
        .map(|a| RadarRow {
            stat: a.subject.clone(),
            value: a.player_value,
            percentile: a.percentile,
        })
        .collect()
}

#[derive(Tabled, Serialize)]
pub struct StrategyRow {
    #[tabled(rename = "Situation")]
    #[serde(rename = "Situation")]
    situation: String,
    #[tabled(rename = "Pitch")]
    #[serde(rename = "Pitch")]
    pitch: String,
    #[tabled(rename = "Share %")]
    #[serde(rename = "Share %")]
    share: f64,
}

pub fn strategy_rows(report: &StrategyReport) -> Vec<StrategyRow> {
    let mut rows = Vec::new();
    let mut extend = |situation: &str, shares: &[PitchShare]| {
        for share in shares {
            rows.push(StrategyRow {
                situation: situation.to_string(),
                pitch: share.pitch_type.clone(),
                share: share.percentage,
            });
        }
    };
    extend("First pitch", &report.first_pitch);
    extend("Two strikes", &report.two_strikes);
    extend("Strikeout pitch", &report.strikeout_pitch);
    rows
}

#[derive(Tabled, Serialize)]
pub struct LeaderboardRow {
    #[tabled(rename = "Board")]
    #[serde(rename = "Board")]
    board: String,
    #[tabled(rename = "Player")]
    #[serde(rename = "Player")]
    player: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

pub fn leaderboard_rows(report: &LeaderboardReport) -> Vec<LeaderboardRow> {
    let boards = [
        ("Fastest pitch", &report.fastest_pitch),
        ("Hardest hit", &report.hardest_hit),
        ("Longest home run", &report.longest_home_run),
        ("Most strikeouts", &report.most_strikeouts),
        ("Most hits", &report.most_hits),
        ("Most home runs", &report.most_home_runs),
    ];
    boards
        .into_iter()
        .filter_map(|(board, entry)| {
            entry.as_ref().map(|e| LeaderboardRow {
                board: board.to_string(),
                player: e.player_name.clone(),
                value: e.value.clone(),
            })
        })
        .collect()
}

#[derive(Tabled, Serialize)]
pub struct PitchChartRow {
    #[tabled(rename = "Plate X")]
    #[serde(rename = "Plate X")]
    plate_x: String,
    #[tabled(rename = "Plate Z")]
    #[serde(rename = "Plate Z")]
    plate_z: String,
    #[tabled(rename = "Pitch")]
    #[serde(rename = "Pitch")]
    pitch: String,
    #[tabled(rename = "mph")]
    #[serde(rename = "mph")]
    speed: String,
    #[tabled(rename = "Result")]
    #[serde(rename = "Result")]
    result: String,
}

pub fn pitch_chart_rows(points: &[PitchChartPoint]) -> Vec<PitchChartRow> {
    points
        .iter()
        .map(|p| PitchChartRow {
            plate_x: fmt_opt_f64(p.plate_x),
            plate_z: fmt_opt_f64(p.plate_z),
            pitch: fmt_opt_str(&p.pitch_name),
            speed: fmt_opt_f64(p.release_speed),
            result: fmt_opt_str(&p.description),
        })
        .collect()
}

#[derive(Tabled, Serialize)]
pub struct SprayChartRow {
    #[tabled(rename = "HC X")]
    #[serde(rename = "HC X")]
    hc_x: String,
    #[tabled(rename = "HC Y")]
    #[serde(rename = "HC Y")]
    hc_y: String,
    #[tabled(rename = "Event")]
    #[serde(rename = "Event")]
    event: String,
    #[tabled(rename = "Exit mph")]
    #[serde(rename = "Exit mph")]
    launch_speed: String,
    #[tabled(rename = "Angle")]
    #[serde(rename = "Angle")]
    launch_angle: String,
}

pub fn spray_chart_rows(points: &[SprayChartPoint]) -> Vec<SprayChartRow> {
    points
        .iter()
        .map(|p| SprayChartRow {
            hc_x: fmt_opt_f64(p.hc_x),
            hc_y: fmt_opt_f64(p.hc_y),
            event: fmt_opt_str(&p.events),
            launch_speed: fmt_opt_f64(p.launch_speed),
            launch_angle: fmt_opt_f64(p.launch_angle),
        })
        .collect()
}

#[derive(Tabled, Serialize)]
pub struct TrajectoryRow {
    #[tabled(rename = "Pitch")]
    #[serde(rename = "Pitch")]
    pitch_type: String,
    #[tabled(rename = "mph")]
    #[serde(rename = "mph")]
    speed: f64,
    #[tabled(rename = "Rel X")]
    #[serde(rename = "Rel X")]
    release_pos_x: f64,
    #[tabled(rename = "Rel Y")]
    #[serde(rename = "Rel Y")]
    release_pos_y: f64,
    #[tabled(rename = "Rel Z")]
    #[serde(rename = "Rel Z")]
    release_pos_z: f64,
    #[tabled(rename = "Plate X")]
    #[serde(rename = "Plate X")]
    plate_x: f64,
    #[tabled(rename = "Plate Z")]
    #[serde(rename = "Plate Z")]
    plate_z: f64,
}

pub fn trajectory_rows(points: &[TrajectoryPoint]) -> Vec<TrajectoryRow> {
    points
        .iter()
        .map(|p| TrajectoryRow {
            pitch_type: p.pitch_type.clone(),
            speed: p.release_speed,
            release_pos_x: p.release_pos_x,
            release_pos_y: p.release_pos_y,
            release_pos_z: p.release_pos_z,
            plate_x: p.plate_x,
            plate_z: p.plate_z,
        })
        .collect()
}

/// Timeline output nests pitches under each at-bat, so the table format
/// prints one block per at-bat instead of a single flat table.
pub fn print_timeline(timeline: &[TimelineAtBat]) {
    if timeline.is_empty() {
        println!("(no at-bats)");
        return;
    }
    for at_bat in timeline {
        println!(
            "{} | at-bat {} | {}",
            at_bat.game_date, at_bat.at_bat_number, at_bat.final_event
        );
        for pitch in &at_bat.pitches {
            println!(
                "  #{} {} {} ({})",
                pitch.pitch_number,
                fmt_opt_str(&pitch.pitch_name),
                pitch
                    .release_speed
                    .map(|v| format!("{:.1} mph", v))
                    .unwrap_or_else(|| "-".to_string()),
                fmt_opt_str(&pitch.description),
            );
        }
    }
}
