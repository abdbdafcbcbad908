//! Row schemas for the season aggregate tables.
//!
//! Every stat field is optional: the provider omits columns for partial
//! seasons and historical eras, and a missing value must stay missing
//! rather than turn into a zero that would poison percentile populations.

use serde::{Deserialize, Deserializer, Serialize};

/// One pitcher's season aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchingSeason {
    #[serde(rename = "playerid")]
    pub player_id: i64,
    /// MLBAM id, used to join against resolver output.
    #[serde(rename = "xMLBAMID")]
    pub mlbam_id: Option<i64>,
    #[serde(rename = "PlayerName")]
    pub name: Option<String>,
    #[serde(rename = "W")]
    pub wins: Option<i64>,
    #[serde(rename = "L")]
    pub losses: Option<i64>,
    #[serde(rename = "ERA")]
    pub era: Option<f64>,
    #[serde(rename = "SO")]
    pub strikeouts: Option<i64>,
    #[serde(rename = "WHIP")]
    pub whip: Option<f64>,
    #[serde(rename = "IP")]
    pub innings: Option<f64>,
    #[serde(rename = "K/9")]
    pub k_per_9: Option<f64>,
    #[serde(rename = "BB/9")]
    pub bb_per_9: Option<f64>,
    /// Ground-ball share in percentage points (0-100).
    #[serde(rename = "GB%", deserialize_with = "percent_opt", default)]
    pub ground_ball_pct: Option<f64>,
}

/// One batter's season aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattingSeason {
    #[serde(rename = "playerid")]
    pub player_id: i64,
    /// MLBAM id, used to join against resolver output.
    #[serde(rename = "xMLBAMID")]
    pub mlbam_id: Option<i64>,
    #[serde(rename = "PlayerName")]
    pub name: Option<String>,
    #[serde(rename = "AVG")]
    pub avg: Option<f64>,
    #[serde(rename = "HR")]
    pub home_runs: Option<i64>,
    #[serde(rename = "RBI")]
    pub rbi: Option<i64>,
    #[serde(rename = "OBP")]
    pub obp: Option<f64>,
    #[serde(rename = "SLG")]
    pub slg: Option<f64>,
    #[serde(rename = "OPS")]
    pub ops: Option<f64>,
    #[serde(rename = "PA")]
    pub plate_appearances: Option<i64>,
    #[serde(rename = "BB")]
    pub walks: Option<i64>,
    #[serde(rename = "SO")]
    pub strikeouts: Option<i64>,
    #[serde(rename = "BB/K")]
    pub bb_per_k: Option<f64>,
    #[serde(rename = "Spd")]
    pub speed: Option<f64>,
}

impl BattingSeason {
    /// Walk-to-strikeout ratio: the provider column when present, derived
    /// from raw walks and strikeouts when omitted.
    pub fn walk_to_strikeout(&self) -> Option<f64> {
        self.bb_per_k.or_else(|| match (self.walks, self.strikeouts) {
            (Some(bb), Some(so)) if so > 0 => Some(bb as f64 / so as f64),
            _ => None,
        })
    }
}

/// Accepts a percentage as a bare number, a fraction, or a "45.3%" string,
/// normalizing to percentage points. Malformed values become `None`.
fn percent_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(Raw::Num(n)) => {
            if n.abs() <= 1.0 {
                Some(n * 100.0)
            } else {
                Some(n)
            }
        }
        Some(Raw::Text(s)) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitching_row_deserializes_with_renames() {
        let row: PitchingSeason = serde_json::from_str(
            r#"{
                "playerid": 22267,
                "xMLBAMID": 669373,
                "PlayerName": "Tarik Skubal",
                "W": 18, "L": 4, "ERA": 2.39, "SO": 228,
                "WHIP": 0.92, "IP": 192.0,
                "K/9": 10.69, "BB/9": 1.64, "GB%": 0.453
            }"#,
        )
        .unwrap();
        assert_eq!(row.player_id, 22267);
        assert_eq!(row.mlbam_id, Some(669373));
        assert_eq!(row.whip, Some(0.92));
        // Fraction normalized to percentage points.
        assert_eq!(row.ground_ball_pct, Some(45.3));
    }

    #[test]
    fn ground_ball_pct_accepts_strings_and_numbers() {
        let from_string: PitchingSeason =
            serde_json::from_str(r#"{"playerid": 1, "GB%": "45.3%"}"#).unwrap();
        assert_eq!(from_string.ground_ball_pct, Some(45.3));

        let from_points: PitchingSeason =
            serde_json::from_str(r#"{"playerid": 1, "GB%": 45.3}"#).unwrap();
        assert_eq!(from_points.ground_ball_pct, Some(45.3));

        let malformed: PitchingSeason =
            serde_json::from_str(r#"{"playerid": 1, "GB%": "n/a"}"#).unwrap();
        assert!(malformed.ground_ball_pct.is_none());

        let missing: PitchingSeason = serde_json::from_str(r#"{"playerid": 1}"#).unwrap();
        assert!(missing.ground_ball_pct.is_none());
    }

    #[test]
    fn sparse_batting_row_keeps_missing_fields_absent() {
        let row: BattingSeason =
            serde_json::from_str(r#"{"playerid": 19755, "AVG": 0.310}"#).unwrap();
        assert_eq!(row.avg, Some(0.310));
        assert!(row.mlbam_id.is_none());
        assert!(row.speed.is_none());
        assert!(row.walk_to_strikeout().is_none());
    }

    #[test]
    fn walk_to_strikeout_derives_from_counts() {
        let row: BattingSeason =
            serde_json::from_str(r#"{"playerid": 1, "BB": 60, "SO": 120}"#).unwrap();
        assert_eq!(row.walk_to_strikeout(), Some(0.5));

        let provided: BattingSeason =
            serde_json::from_str(r#"{"playerid": 1, "BB/K": 0.8, "BB": 60, "SO": 120}"#)
                .unwrap();
        assert_eq!(provided.walk_to_strikeout(), Some(0.8));

        let zero_so: BattingSeason =
            serde_json::from_str(r#"{"playerid": 1, "BB": 10, "SO": 0}"#).unwrap();
        assert!(zero_so.walk_to_strikeout().is_none());
    }
}
