//! HTTP client for the season aggregate leaderboard API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::FangraphsError;
use super::types::{BattingSeason, PitchingSeason};

/// Request timeout for leaderboard downloads. Full-league tables are a few
/// megabytes and the provider is slow to assemble them.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct LeadersResponse<T> {
    data: Vec<T>,
}

/// REST client for the season aggregate provider.
pub struct FangraphsClient {
    client: reqwest::Client,
    base_url: String,
}

impl FangraphsClient {
    /// Creates a new client with the default base URL.
    pub fn new() -> Result<Self, FangraphsError> {
        Self::with_base_url("https://www.fangraphs.com")
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: &str) -> Result<Self, FangraphsError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_leaders<T: DeserializeOwned>(
        &self,
        stats: &str,
        year: i32,
    ) -> Result<Vec<T>, FangraphsError> {
        let url = format!("{}/api/leaders/major-league/data", self.base_url);
        let year = year.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("pos", "all"),
                ("lev", "mlb"),
                ("qual", "0"),
                ("stats", stats),
                ("season", year.as_str()),
                ("season1", year.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("leaderboard download failed with status {}", status);
            return Err(FangraphsError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: LeadersResponse<T> = serde_json::from_str(&body).map_err(|e| {
            let snippet = if body.len() > 500 { &body[..500] } else { &body };
            FangraphsError::ParseFailed(format!("{} | body: {}", e, snippet))
        })?;
        Ok(parsed.data)
    }

    /// Downloads the pitching aggregate table for a season.
    pub async fn get_pitching(&self, year: i32) -> Result<Vec<PitchingSeason>, FangraphsError> {
        self.get_leaders("pit", year).await
    }

    /// Downloads the batting aggregate table for a season.
    pub async fn get_batting(&self, year: i32) -> Result<Vec<BattingSeason>, FangraphsError> {
        self.get_leaders("bat", year).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pitching_body() -> serde_json::Value {
        serde_json::json!({
            "data": [
                {
                    "playerid": 22267,
                    "xMLBAMID": 669373,
                    "PlayerName": "Tarik Skubal",
                    "W": 18, "L": 4, "ERA": 2.39, "SO": 228,
                    "WHIP": 0.92, "IP": 192.0,
                    "K/9": 10.69, "BB/9": 1.64, "GB%": 0.453
                }
            ]
        })
    }

    #[tokio::test]
    async fn pitching_table_downloads() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/leaders/major-league/data"))
            .and(query_param("stats", "pit"))
            .and(query_param("season", "2024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pitching_body()))
            .mount(&server)
            .await;

        let client = FangraphsClient::with_base_url(&server.uri()).unwrap();
        let rows = client.get_pitching(2024).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mlbam_id, Some(669373));
        assert_eq!(rows[0].innings, Some(192.0));
    }

    #[tokio::test]
    async fn batting_table_downloads() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/leaders/major-league/data"))
            .and(query_param("stats", "bat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {
                        "playerid": 19755,
                        "xMLBAMID": 660271,
                        "PlayerName": "Shohei Ohtani",
                        "AVG": 0.310, "HR": 54, "RBI": 130,
                        "OBP": 0.390, "SLG": 0.646, "OPS": 1.036,
                        "PA": 731, "BB": 81, "SO": 162, "Spd": 7.1
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = FangraphsClient::with_base_url(&server.uri()).unwrap();
        let rows = client.get_batting(2024).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].home_runs, Some(54));
        assert_eq!(rows[0].walk_to_strikeout(), Some(0.5));
    }

    #[tokio::test]
    async fn server_error_surfaces_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/leaders/major-league/data"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = FangraphsClient::with_base_url(&server.uri()).unwrap();
        let result = client.get_pitching(2024).await;
        assert!(matches!(result, Err(FangraphsError::HttpStatus(500))));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/leaders/major-league/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = FangraphsClient::with_base_url(&server.uri()).unwrap();
        let result = client.get_batting(2024).await;
        assert!(matches!(result, Err(FangraphsError::ParseFailed(_))));
    }
}
