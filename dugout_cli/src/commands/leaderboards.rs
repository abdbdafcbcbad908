use anyhow::Result;
use dugout_lib::queries::leaderboard;
use dugout_lib::DugoutService;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output::{leaderboard_rows, render, OutputFormat};

pub async fn run(service: &DugoutService, format: &OutputFormat) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("sweeping the last 7 days of league logs...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let report = leaderboard::leaderboards(service).await;
    spinner.finish_and_clear();

    match report? {
        Some(report) => {
            eprintln!(
                "data period: {} - {}",
                report.window_start, report.window_end
            );
            render(format, &report, leaderboard_rows(&report))
        }
        None => {
            println!("No game data found in the last week.");
            Ok(())
        }
    }
}
