//! Player resolution: human input to canonical player records.

use serde::Serialize;

use crate::error::DugoutError;
use crate::portrait::PortraitClient;
use crate::registry::{RegistryClient, RegistryPlayer};

/// Batting handedness as recorded by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
    Switch,
}

impl Handedness {
    /// Parses the directory's single-letter code. Unknown codes resolve to
    /// `None` rather than an error; downstream analysis treats unknown
    /// handedness as "analyze all batters".
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(Self::Left),
            "R" => Some(Self::Right),
            "S" => Some(Self::Switch),
            _ => None,
        }
    }
}

/// A resolved player: identifier keys across provider systems plus the
/// display attributes queries need. Immutable once resolved.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerRecord {
    /// MLBAM id (pitch-log provider key).
    pub mlbam_id: i64,
    /// FanGraphs id (season aggregate provider key), when known.
    pub fangraphs_id: Option<i64>,
    pub name_first: String,
    pub name_last: String,
    pub bats: Option<Handedness>,
    pub team: Option<String>,
    pub image_url: Option<String>,
}

impl PlayerRecord {
    /// Builds a record from a directory candidate. Candidates without an
    /// MLBAM key are unusable and yield `None`.
    pub fn from_registry(player: RegistryPlayer) -> Option<Self> {
        let mlbam_id = player.key_mlbam?;
        Some(Self {
            mlbam_id,
            fangraphs_id: player.key_fangraphs,
            name_first: player.name_first,
            name_last: player.name_last,
            bats: player.bats.as_deref().and_then(Handedness::from_code),
            team: player.team,
            image_url: None,
        })
    }

    /// Title-cased display name ("shohei ohtani" -> "Shohei Ohtani").
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.name_first, self.name_last);
        title_case(full.trim())
    }
}

/// One entry of a player search result list.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub name: String,
    pub mlbam_id: i64,
    pub image_url: Option<String>,
}

/// Splits a human-entered name into (given name, surname).
///
/// A comma means "Surname, Given". Otherwise the first whitespace token is
/// the given name and the last is the surname; a single token is treated
/// as a given name with an empty surname.
pub fn parse_name(name: &str) -> (String, String) {
    if let Some((last, first)) = name.split_once(',') {
        return (first.trim().to_string(), last.trim().to_string());
    }
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (only.to_string(), String::new()),
        [first, .., last] => (first.to_string(), last.to_string()),
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves names and ids to [`PlayerRecord`]s, enriching each with a
/// portrait probe.
pub struct Resolver {
    registry: RegistryClient,
    portraits: PortraitClient,
}

/// Maximum candidates returned by a search.
const MAX_SEARCH_RESULTS: usize = 7;

impl Resolver {
    pub fn new(registry: RegistryClient, portraits: PortraitClient) -> Self {
        Self {
            registry,
            portraits,
        }
    }

    /// Resolves a human-entered name. The directory lookup is fuzzy and
    /// the first usable candidate in provider order wins; a failed
    /// portrait probe degrades to an absent portrait.
    pub async fn resolve_by_name(&self, name: &str) -> Result<PlayerRecord, DugoutError> {
        let (first, last) = parse_name(name);
        let candidates = self.registry.search(&last, &first, true).await?;
        let mut record = candidates
            .into_iter()
            .find_map(PlayerRecord::from_registry)
            .ok_or_else(|| DugoutError::PlayerNotFound(name.to_string()))?;
        record.image_url = self.portraits.probe(record.mlbam_id).await;
        Ok(record)
    }

    /// Resolves an MLBAM id through the directory's reverse lookup.
    pub async fn resolve_by_id(&self, mlbam_id: i64) -> Result<PlayerRecord, DugoutError> {
        let player = self.registry.player(mlbam_id).await?;
        let mut record = player
            .and_then(PlayerRecord::from_registry)
            .ok_or_else(|| DugoutError::PlayerNotFound(mlbam_id.to_string()))?;
        record.image_url = self.portraits.probe(record.mlbam_id).await;
        Ok(record)
    }

    /// Resolves a pitcher and a batter concurrently. Either failure fails
    /// the pair.
    pub async fn resolve_pair(
        &self,
        pitcher: &str,
        batter: &str,
    ) -> Result<(PlayerRecord, PlayerRecord), DugoutError> {
        tokio::try_join!(self.resolve_by_name(pitcher), self.resolve_by_name(batter))
    }

    /// Fuzzy search returning up to seven candidates ranked by name
    /// similarity, portraits probed concurrently.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, DugoutError> {
        let candidates = self.registry.search(term, "", true).await?;
        let mut records: Vec<PlayerRecord> = candidates
            .into_iter()
            .filter_map(PlayerRecord::from_registry)
            .collect();

        let needle = term.to_lowercase();
        records.sort_by(|a, b| {
            similarity(&needle, b)
                .total_cmp(&similarity(&needle, a))
        });
        records.truncate(MAX_SEARCH_RESULTS);

        let probes = records
            .iter()
            .map(|r| self.portraits.probe(r.mlbam_id));
        let portraits = futures::future::join_all(probes).await;

        Ok(records
            .into_iter()
            .zip(portraits)
            .map(|(record, image_url)| SearchResult {
                name: record.full_name(),
                mlbam_id: record.mlbam_id,
                image_url,
            })
            .collect())
    }
}

fn similarity(needle: &str, record: &PlayerRecord) -> f64 {
    let last = record.name_last.to_lowercase();
    let full = format!("{} {}", record.name_first, record.name_last).to_lowercase();
    strsim::jaro_winkler(needle, &last).max(strsim::jaro_winkler(needle, &full))
}
