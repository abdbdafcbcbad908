use anyhow::Result;
use dugout_lib::queries::matchup;
use dugout_lib::DugoutService;

use super::PairArgs;
use crate::output::{
    distribution_rows, matchup_summary_rows, pitch_chart_rows, print_json, print_timeline,
    render, spray_chart_rows, trajectory_rows, OutputFormat,
};

pub async fn stats(
    args: &PairArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    match matchup::summary(service, &args.pitcher, &args.batter).await? {
        Some(summary) => render(format, &summary, matchup_summary_rows(&summary)),
        None => {
            println!("No matchup data between these players.");
            Ok(())
        }
    }
}

pub async fn timeline(
    args: &PairArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let timeline = matchup::timeline(service, &args.pitcher, &args.batter).await?;
    match format {
        OutputFormat::Json => print_json(&timeline),
        _ => print_timeline(&timeline),
    }
    Ok(())
}

pub async fn simulate(
    args: &PairArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let distribution = matchup::simulate(service, &args.pitcher, &args.batter).await?;
    render(format, &distribution, distribution_rows(&distribution))
}

pub async fn pitch_chart(
    args: &PairArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let points = matchup::pitch_chart(service, &args.pitcher, &args.batter).await?;
    render(format, &points, pitch_chart_rows(&points))
}

pub async fn spray_chart(
    args: &PairArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let points = matchup::spray_chart(service, &args.pitcher, &args.batter).await?;
    render(format, &points, spray_chart_rows(&points))
}

pub async fn trajectory(
    args: &PairArgs,
    service: &DugoutService,
    format: &OutputFormat,
) -> Result<()> {
    let points = matchup::trajectory(service, &args.pitcher, &args.batter).await?;
    render(format, &points, trajectory_rows(&points))
}
