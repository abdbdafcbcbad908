use anyhow::Result;
use clap::Args;
use dugout_lib::queries::player;
use dugout_lib::DugoutService;

use crate::output::{
    print_json, radar_rows, render, search_rows, season_summary_rows, OutputFormat, StatRow,
};

#[derive(Args)]
pub struct SearchArgs {
    /// Partial player name (at least two characters)
    pub term: String,
}

pub async fn search(
    args: &SearchArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let results = player::search(service, &args.term).await?;
    if results.is_empty() {
        eprintln!("No players matched '{}'", args.term);
    }
    render(format, &results, search_rows(&results))
}

#[derive(Args)]
pub struct InfoArgs {
    /// Player name
    pub name: String,
}

pub async fn info(args: &InfoArgs, service: &DugoutService, format: &OutputFormat) -> Result<()> {
    let info = player::info(service, &args.name).await?;
    match format {
        OutputFormat::Json => print_json(&info),
        _ => {
            println!("{}", info.name);
            if let Some(url) = &info.image_url {
                println!("{}", url);
            }
        }
    }
    Ok(())
}

#[derive(Args)]
pub struct SeasonStatsArgs {
    /// Player name
    pub name: String,
}

pub async fn season_stats(
    args: &SeasonStatsArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let summary = player::season_summary(service, &args.name).await?;
    let rows: Vec<StatRow> = season_summary_rows(&summary);
    render(format, &summary, rows)
}

#[derive(Args)]
pub struct RadarArgs {
    /// Player name
    pub name: String,
}

pub async fn radar(
    args: &RadarArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let radar = player::radar(service, &args.name).await?;
    let axes = match &radar {
        player::RadarSummary::Pitcher { data } => data,
        player::RadarSummary::Batter { data } => data,
    };
    render(format, &radar, radar_rows(axes))
}
