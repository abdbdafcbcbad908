//! Portrait probe against the head-shot image endpoint.
//!
//! A probe is best-effort: a missing portrait must never fail the query
//! that asked for it, so every failure mode collapses to `None`. Results,
//! including misses, are memoized for the life of the process.

use std::time::Duration;

use dashmap::DashMap;

/// Hard bound on a single probe, resolution included.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Client that resolves player ids to portrait URLs.
pub struct PortraitClient {
    base_url: String,
    cache: DashMap<i64, Option<String>>,
}

impl PortraitClient {
    /// Creates a new client against the production image host.
    pub fn new() -> Self {
        Self::with_base_url("https://securea.mlb.com")
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: DashMap::new(),
        }
    }

    /// Probes for a player's portrait, following redirects.
    ///
    /// Returns the final URL on a 200 response. Any other status, a
    /// timeout, or a network error yields `None`.
    pub async fn probe(&self, player_id: i64) -> Option<String> {
        if let Some(cached) = self.cache.get(&player_id) {
            return cached.clone();
        }
        let resolved = self.probe_uncached(player_id).await;
        self.cache.insert(player_id, resolved.clone());
        resolved
    }

    async fn probe_uncached(&self, player_id: i64) -> Option<String> {
        let url = format!(
            "{}/mlb/images/players/head_shot/{}.jpg",
            self.base_url, player_id
        );
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .ok()?;
        match client.head(&url).send().await {
            Ok(response) if response.status().is_success() => {
                Some(response.url().to_string())
            }
            Ok(response) => {
                tracing::debug!(
                    "portrait probe for {} returned {}",
                    player_id,
                    response.status()
                );
                None
            }
            Err(e) => {
                tracing::debug!("portrait probe for {} failed: {}", player_id, e);
                None
            }
        }
    }
}

impl Default for PortraitClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn probe_success_returns_url() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/mlb/images/players/head_shot/660271.jpg"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = PortraitClient::with_base_url(&server.uri());
        let url = client.probe(660271).await;
        assert!(url.is_some());
        assert!(url.unwrap().ends_with("/mlb/images/players/head_shot/660271.jpg"));
    }

    #[tokio::test]
    async fn probe_missing_portrait_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/mlb/images/players/head_shot/42.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = PortraitClient::with_base_url(&server.uri());
        assert!(client.probe(42).await.is_none());
    }

    #[tokio::test]
    async fn probe_results_are_memoized() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/mlb/images/players/head_shot/660271.jpg"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = PortraitClient::with_base_url(&server.uri());
        let first = client.probe(660271).await;
        let second = client.probe(660271).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unreachable_host_is_none() {
        // Nothing is listening on this port.
        let client = PortraitClient::with_base_url("http://127.0.0.1:1");
        assert!(client.probe(660271).await.is_none());
    }
}
