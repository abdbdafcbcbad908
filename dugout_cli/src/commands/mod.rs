pub mod arsenal;
pub mod leaderboards;
pub mod matchup;
pub mod player;

use clap::Args;

/// The pitcher/batter pair most matchup commands operate on.
#[derive(Args)]
pub struct PairArgs {
    /// Pitcher name ("First Last" or "Last, First")
    #[arg(long)]
    pub pitcher: String,

    /// Batter name ("First Last" or "Last, First")
    #[arg(long)]
    pub batter: String,
}
