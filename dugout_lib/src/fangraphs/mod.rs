//! Season aggregate provider client (FanGraphs leaderboard API).

mod client;
mod error;
mod types;

pub use client::FangraphsClient;
pub use error::FangraphsError;
pub use types::{BattingSeason, PitchingSeason};
