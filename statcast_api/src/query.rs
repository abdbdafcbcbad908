//! Query builder for the statcast search CSV endpoint.

use chrono::NaiveDate;
use url::Url;

/// Parameters for a pitch-log download: a date window, optionally scoped
/// to a single pitcher.
///
/// A query without a pitcher id is a league-wide download for the window
/// (used for daily leaderboard sweeps), which the provider only accepts
/// for short windows.
#[derive(Debug, Clone)]
pub struct PitchLogQuery {
    /// MLBAM id of the pitcher whose log is requested. `None` means
    /// league-wide.
    pub pitcher_id: Option<i64>,
    /// First game date included in the window.
    pub start_date: NaiveDate,
    /// Last game date included in the window.
    pub end_date: NaiveDate,
}

impl PitchLogQuery {
    /// Builds a query for one pitcher's log over the given window.
    pub fn pitcher(pitcher_id: i64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            pitcher_id: Some(pitcher_id),
            start_date,
            end_date,
        }
    }

    /// Builds a league-wide query for the given window.
    pub fn league(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            pitcher_id: None,
            start_date,
            end_date,
        }
    }

    /// Appends this query's parameters to the given URL, returning the
    /// modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("all", "true")
            .append_pair("type", "details")
            .append_pair("min_pitches", "0")
            .append_pair(
                "game_date_gt",
                &self.start_date.format("%Y-%m-%d").to_string(),
            )
            .append_pair(
                "game_date_lt",
                &self.end_date.format("%Y-%m-%d").to_string(),
            );
        if let Some(pitcher_id) = self.pitcher_id {
            url.query_pairs_mut()
                .append_pair("player_type", "pitcher")
                .append_pair("pitchers_lookup[]", &pitcher_id.to_string());
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/statcast_search/csv").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pitcher_query_url() {
        let url = PitchLogQuery::pitcher(477132, date(2017, 1, 1), date(2025, 12, 31))
            .add_to_url(&base_url());
        insta::assert_snapshot!(
            url.to_string(),
            @"https://example.com/statcast_search/csv?all=true&type=details&min_pitches=0&game_date_gt=2017-01-01&game_date_lt=2025-12-31&player_type=pitcher&pitchers_lookup%5B%5D=477132"
        );
    }

    #[test]
    fn league_query_omits_pitcher_params() {
        let url =
            PitchLogQuery::league(date(2025, 8, 1), date(2025, 8, 1)).add_to_url(&base_url());
        let query = url.query().unwrap();
        assert!(query.contains("game_date_gt=2025-08-01"));
        assert!(query.contains("game_date_lt=2025-08-01"));
        assert!(!query.contains("player_type"));
        assert!(!query.contains("pitchers_lookup"));
    }
}
