//! HTTP client for the player directory service.
//!
//! The directory is a hosted mirror of the Chadwick Bureau register: it
//! maps human names to the identifier keys the other providers use.
//! Reverse lookups by MLBAM id are memoized (including misses) in a
//! bounded cache, since leaderboard sweeps resolve the same handful of
//! players repeatedly.

use std::time::Duration;

use super::error::RegistryError;
use super::types::RegistryPlayer;
use crate::cache::BoundedCache;

/// Request timeout for directory calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Reverse lookups memoized per process.
const LOOKUP_CACHE_CAPACITY: usize = 256;

/// REST client for the player directory.
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
    lookups: BoundedCache<i64, Option<RegistryPlayer>>,
}

impl RegistryClient {
    /// Creates a new client with the default base URL.
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_base_url("https://register.chadwick-bureau.dev")
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: &str) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            lookups: BoundedCache::new(LOOKUP_CACHE_CAPACITY),
        })
    }

    /// Searches the directory by surname and given name.
    ///
    /// With `fuzzy` the service tolerates spelling and formatting variance
    /// and returns candidates in its own relevance order. An empty result
    /// is not an error.
    pub async fn search(
        &self,
        last_name: &str,
        first_name: &str,
        fuzzy: bool,
    ) -> Result<Vec<RegistryPlayer>, RegistryError> {
        let url = format!("{}/register/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("last", last_name),
                ("first", first_name),
                ("fuzzy", if fuzzy { "true" } else { "false" }),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            tracing::error!("registry search failed with status {}", status);
            return Err(RegistryError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let snippet = if body.len() > 500 { &body[..500] } else { &body };
            RegistryError::ParseFailed(format!("{} | body: {}", e, snippet))
        })
    }

    /// Looks up one player by MLBAM id. `Ok(None)` when the directory has
    /// no record for the id.
    pub async fn player(&self, mlbam_id: i64) -> Result<Option<RegistryPlayer>, RegistryError> {
        if let Some(cached) = self.lookups.get(&mlbam_id) {
            return Ok(cached);
        }
        let resolved = self.player_uncached(mlbam_id).await?;
        self.lookups.insert(mlbam_id, resolved.clone());
        Ok(resolved)
    }

    async fn player_uncached(
        &self,
        mlbam_id: i64,
    ) -> Result<Option<RegistryPlayer>, RegistryError> {
        let url = format!("{}/register/player/{}", self.base_url, mlbam_id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            tracing::error!("registry lookup of {} failed with status {}", mlbam_id, status);
            return Err(RegistryError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let player: RegistryPlayer = serde_json::from_str(&body).map_err(|e| {
            let snippet = if body.len() > 500 { &body[..500] } else { &body };
            RegistryError::ParseFailed(format!("{} | body: {}", e, snippet))
        })?;
        Ok(Some(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_players_json() -> serde_json::Value {
        serde_json::json!([
            {
                "name_first": "shohei",
                "name_last": "ohtani",
                "key_mlbam": 660271,
                "key_fangraphs": 19755,
                "bats": "L",
                "team": "LAD"
            },
            {
                "name_first": "tarik",
                "name_last": "skubal",
                "key_mlbam": 669373,
                "key_fangraphs": 22267,
                "bats": null,
                "team": "DET"
            }
        ])
    }

    #[tokio::test]
    async fn search_returns_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/register/search"))
            .and(query_param("last", "ohtani"))
            .and(query_param("fuzzy", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_players_json()))
            .mount(&server)
            .await;

        let client = RegistryClient::with_base_url(&server.uri()).unwrap();
        let players = client.search("ohtani", "shohei", true).await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].key_mlbam, Some(660271));
        assert_eq!(players[0].bats.as_deref(), Some("L"));
        assert!(players[1].bats.is_none());
    }

    #[tokio::test]
    async fn search_not_found_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/register/search"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RegistryClient::with_base_url(&server.uri()).unwrap();
        let players = client.search("nobody", "", true).await.unwrap();
        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn search_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/register/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = RegistryClient::with_base_url(&server.uri()).unwrap();
        let result = client.search("ohtani", "", true).await;
        assert!(matches!(result, Err(RegistryError::HttpStatus(503))));
    }

    #[tokio::test]
    async fn player_lookup_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/register/player/660271"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "name_first": "shohei",
                    "name_last": "ohtani",
                    "key_mlbam": 660271,
                    "key_fangraphs": 19755,
                    "bats": "L",
                    "team": "LAD"
                })),
            )
            .mount(&server)
            .await;

        let client = RegistryClient::with_base_url(&server.uri()).unwrap();
        let player = client.player(660271).await.unwrap();
        assert!(player.is_some());
        assert_eq!(player.unwrap().name_last, "ohtani");
    }

    #[tokio::test]
    async fn player_lookup_not_found_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/register/player/1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RegistryClient::with_base_url(&server.uri()).unwrap();
        assert!(client.player(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn player_lookup_is_memoized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/register/player/660271"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "name_first": "shohei",
                    "name_last": "ohtani",
                    "key_mlbam": 660271,
                    "key_fangraphs": 19755,
                    "bats": "L",
                    "team": "LAD"
                })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = RegistryClient::with_base_url(&server.uri()).unwrap();
        let first = client.player(660271).await.unwrap();
        let second = client.player(660271).await.unwrap();
        assert_eq!(
            first.map(|p| p.key_mlbam),
            second.map(|p| p.key_mlbam)
        );
    }

    #[tokio::test]
    async fn negative_lookups_are_memoized_too() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/register/player/42"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = RegistryClient::with_base_url(&server.uri()).unwrap();
        assert!(client.player(42).await.unwrap().is_none());
        assert!(client.player(42).await.unwrap().is_none());
    }
}
