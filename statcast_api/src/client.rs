//! HTTP client for the statcast search CSV endpoint.

use std::time::Duration;

use url::Url;

use crate::{query::PitchLogQuery, types::PitchEvent, user_agent::get_user_agent, Error};

/// HTTP client for the statcast pitch-log provider.
///
/// Sends requests with browser-like headers and a randomized user agent to
/// avoid being blocked. Each request builds a fresh `reqwest::Client` with
/// a 30-second timeout.
pub struct Client {
    /// Base URL for the provider. Defaults to `https://baseballsavant.mlb.com`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production statcast endpoint.
    pub fn new() -> Self {
        Self {
            base_api_url: "https://baseballsavant.mlb.com".to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.to_string(),
        }
    }

    fn get_url(&self, query: &PitchLogQuery) -> Result<Url, Error> {
        let url = Url::parse(format!("{}/statcast_search/csv", &self.base_api_url).as_str())
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            })?;
        Ok(query.add_to_url(&url))
    }

    /// Downloads the pitch log matching the given query.
    ///
    /// Use [`PitchLogQuery::pitcher`] for one pitcher's log over a window
    /// and [`PitchLogQuery::league`] for a league-wide daily window. Rows
    /// come back in provider order.
    pub async fn get_pitch_log(&self, query: &PitchLogQuery) -> Result<Vec<PitchEvent>, Error> {
        let url = self.get_url(query)?;
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "text/csv, text/plain, */*")
            .header("accept-language", "en-US,en;q=0.9")
            .header("referer", "https://baseballsavant.mlb.com/statcast_search")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get pitch log: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        parse_pitch_csv(&body)
    }
}

fn parse_pitch_csv(body: &str) -> Result<Vec<PitchEvent>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut rows = Vec::new();
    for record in reader.deserialize::<PitchEvent>() {
        let row = record.map_err(|e| {
            tracing::error!("Failed to parse pitch row: {} | body: {}", e, truncate_body(body));
            Error::MalformedCsv
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
