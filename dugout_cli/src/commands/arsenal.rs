use anyhow::Result;
use clap::Args;
use dugout_lib::queries::arsenal;
use dugout_lib::DugoutService;

use super::PairArgs;
use crate::output::{
    arsenal_rows, league_movement_rows, movement_rows, render, strategy_rows, OutputFormat,
};

#[derive(Args)]
pub struct PitcherArgs {
    /// Pitcher name
    pub pitcher: String,
}

pub async fn arsenal(
    args: &PitcherArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let rows = arsenal::arsenal(service, &args.pitcher).await?;
    if rows.is_empty() {
        eprintln!("No typed pitches on record for this season.");
    }
    render(format, &rows, arsenal_rows(&rows))
}

pub async fn movement(
    args: &PitcherArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let points = arsenal::movement(service, &args.pitcher).await?;
    render(format, &points, movement_rows(&points))
}

pub async fn league_movement(format: &OutputFormat) -> Result<()> {
    let reference = arsenal::league_average_movement();
    render(format, &reference, league_movement_rows(reference))
}

pub async fn strategy(
    args: &PairArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let report = arsenal::strategy(service, &args.pitcher, &args.batter).await?;
    eprintln!("Analysis target: {}", report.analysis_target);
    render(format, &report, strategy_rows(&report))
}
