//! Composition root: wires provider clients, caches, and query windows.

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::DugoutError;
use crate::fangraphs::FangraphsClient;
use crate::league::LeagueStats;
use crate::portrait::PortraitClient;
use crate::registry::RegistryClient;
use crate::resolver::Resolver;

/// First game date considered for pitcher-vs-batter matchup history.
const MATCHUP_WINDOW_START: (i32, u32, u32) = (2017, 1, 1);

/// Configuration for [`DugoutService`]. `None` base URLs use each
/// provider's production endpoint.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub statcast_base_url: Option<String>,
    pub registry_base_url: Option<String>,
    pub fangraphs_base_url: Option<String>,
    pub portrait_base_url: Option<String>,
    /// Season used for current-season queries. `None` means the current
    /// UTC year.
    pub season: Option<i32>,
}

impl ServiceConfig {
    /// The season current-season queries default to.
    pub fn current_season() -> i32 {
        Utc::now().year()
    }
}

/// The service behind every query handler: provider clients, the season
/// cache, and the query windows. Construct one per process and share it;
/// handlers only borrow it.
pub struct DugoutService {
    pub(crate) statcast: statcast_api::Client,
    pub(crate) resolver: Resolver,
    pub(crate) league: LeagueStats,
    season: i32,
}

impl DugoutService {
    pub fn new(config: ServiceConfig) -> Result<Self, DugoutError> {
        let statcast = match &config.statcast_base_url {
            Some(url) => statcast_api::Client::with_base_url(url),
            None => statcast_api::Client::new(),
        };
        let registry = match &config.registry_base_url {
            Some(url) => RegistryClient::with_base_url(url),
            None => RegistryClient::new(),
        }?;
        let fangraphs = match &config.fangraphs_base_url {
            Some(url) => FangraphsClient::with_base_url(url),
            None => FangraphsClient::new(),
        }?;
        let portraits = match &config.portrait_base_url {
            Some(url) => PortraitClient::with_base_url(url),
            None => PortraitClient::new(),
        };

        let season = config.season.unwrap_or_else(ServiceConfig::current_season);
        crate::validation::validate_season(season)?;

        Ok(Self {
            statcast,
            resolver: Resolver::new(registry, portraits),
            league: LeagueStats::new(fangraphs),
            season,
        })
    }

    /// The season current-season queries run against.
    pub fn season(&self) -> i32 {
        self.season
    }

    /// The player resolver (exposed for direct lookups).
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Date window covering the configured season.
    pub(crate) fn season_window(&self) -> (NaiveDate, NaiveDate) {
        (date(self.season, 1, 1), date(self.season, 12, 31))
    }

    /// Date window for matchup history: a fixed start year through the end
    /// of the configured season.
    pub(crate) fn matchup_window(&self) -> (NaiveDate, NaiveDate) {
        let (y, m, d) = MATCHUP_WINDOW_START;
        (date(y, m, d), date(self.season, 12, 31))
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("calendar constant is a valid date")
}
