//! Query handlers, one module per capability family.
//!
//! Every handler is the same short pipeline: resolve player(s), fetch the
//! raw data window, filter to scope, delegate to the reconstruction /
//! classification / aggregation modules, and shape a serializable
//! response. There are no retries anywhere: a failure at any stage
//! short-circuits into the [`crate::error::DugoutError`] taxonomy. An
//! empty matchup is a legitimate empty result, not an error.

pub mod arsenal;
pub mod leaderboard;
pub mod matchup;
pub mod player;
