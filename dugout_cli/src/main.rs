mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dugout_lib::{DugoutService, ServiceConfig};

use crate::commands::PairArgs;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "dugout")]
#[command(about = "Baseball matchup analytics from pitch-by-pitch data")]
struct Cli {
    /// Output format: table, json, or csv
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Season for current-season queries (defaults to the current year)
    #[arg(long, global = true)]
    season: Option<i32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search players by partial name
    Search(commands::player::SearchArgs),
    /// Basic player info (name and portrait)
    PlayerInfo(commands::player::InfoArgs),
    /// Season summary for a player
    SeasonStats(commands::player::SeasonStatsArgs),
    /// Percentile radar for a player
    Radar(commands::player::RadarArgs),
    /// Pitcher-vs-batter summary stats
    Matchup(PairArgs),
    /// Pitcher-vs-batter at-bat timeline
    Timeline(PairArgs),
    /// Outcome probability simulation for a matchup
    Simulate(PairArgs),
    /// Pitch location chart data for a matchup
    PitchChart(PairArgs),
    /// Batted-ball spray chart data for a matchup
    SprayChart(PairArgs),
    /// 3D pitch trajectory data for a matchup
    Trajectory(PairArgs),
    /// Pitch arsenal for the season
    Arsenal(commands::arsenal::PitcherArgs),
    /// Pitch movement breakdown for a pitcher
    Movement(commands::arsenal::PitcherArgs),
    /// League-average movement reference table
    LeagueMovement,
    /// Pitching strategy breakdown vs a batter's handedness
    Strategy(PairArgs),
    /// Rolling 7-day leaderboards
    Leaderboards,
}

fn env_url(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dugout=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(cli.output.as_str());

    let service = DugoutService::new(ServiceConfig {
        statcast_base_url: env_url("DUGOUT_STATCAST_URL"),
        registry_base_url: env_url("DUGOUT_REGISTRY_URL"),
        fangraphs_base_url: env_url("DUGOUT_FANGRAPHS_URL"),
        portrait_base_url: env_url("DUGOUT_PORTRAIT_URL"),
        season: cli.season,
    })?;

    match &cli.command {
        Commands::Search(args) => commands::player::search(args, &service, &format).await?,
        Commands::PlayerInfo(args) => commands::player::info(args, &service, &format).await?,
        Commands::SeasonStats(args) => {
            commands::player::season_stats(args, &service, &format).await?
        }
        Commands::Radar(args) => commands::player::radar(args, &service, &format).await?,
        Commands::Matchup(args) => commands::matchup::stats(args, &service, &format).await?,
        Commands::Timeline(args) => commands::matchup::timeline(args, &service, &format).await?,
        Commands::Simulate(args) => commands::matchup::simulate(args, &service, &format).await?,
        Commands::PitchChart(args) => {
            commands::matchup::pitch_chart(args, &service, &format).await?
        }
        Commands::SprayChart(args) => {
            commands::matchup::spray_chart(args, &service, &format).await?
        }
        Commands::Trajectory(args) => {
            commands::matchup::trajectory(args, &service, &format).await?
        }
        Commands::Arsenal(args) => commands::arsenal::arsenal(args, &service, &format).await?,
        Commands::Movement(args) => commands::arsenal::movement(args, &service, &format).await?,
        Commands::LeagueMovement => commands::arsenal::league_movement(&format).await?,
        Commands::Strategy(args) => commands::arsenal::strategy(args, &service, &format).await?,
        Commands::Leaderboards => commands::leaderboards::run(&service, &format).await?,
    }

    Ok(())
}
