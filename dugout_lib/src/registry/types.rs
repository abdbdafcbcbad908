use serde::{Deserialize, Serialize};

/// One candidate record from the player directory.
///
/// Field names follow the register's column names. Identifier keys are
/// nullable: historical records may exist in one provider system but not
/// another, and consumers discard candidates without the key they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryPlayer {
    pub name_first: String,
    pub name_last: String,
    /// MLBAM id, the key the pitch-log provider uses.
    pub key_mlbam: Option<i64>,
    /// FanGraphs id, the key the season aggregate provider uses.
    pub key_fangraphs: Option<i64>,
    /// Batting handedness: "L", "R", or "S".
    pub bats: Option<String>,
    pub team: Option<String>,
}
