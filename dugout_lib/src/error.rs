//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer.
///
/// Player-not-found, insufficient-data, and invalid-input conditions are
/// kept distinct so callers can surface them separately from upstream
/// provider failures. An empty matchup is not an error at all: handlers
/// return empty collections for it.
#[derive(Debug)]
pub enum DugoutError {
    /// A name or id resolved to no player candidate.
    PlayerNotFound(String),
    /// Data was present but too sparse for the requested computation.
    InsufficientData(String),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// An error from one of the upstream providers.
    Upstream(UpstreamError),
}

/// The provider a failed upstream call belonged to.
#[derive(Debug)]
pub enum UpstreamError {
    /// Pitch-log provider failure.
    Statcast(statcast_api::Error),
    /// Player directory failure.
    Registry(crate::registry::RegistryError),
    /// Season aggregate provider failure.
    SeasonStats(crate::fangraphs::FangraphsError),
}

impl fmt::Display for DugoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerNotFound(who) => write!(f, "Player not found: {}", who),
            Self::InsufficientData(msg) => write!(f, "Insufficient data: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Upstream(e) => write!(f, "Upstream error: {}", e),
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statcast(e) => write!(f, "statcast: {}", e),
            Self::Registry(e) => write!(f, "player registry: {}", e),
            Self::SeasonStats(e) => write!(f, "season aggregates: {}", e),
        }
    }
}

impl std::error::Error for DugoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Statcast(e) => Some(e),
            Self::Registry(e) => Some(e),
            Self::SeasonStats(e) => Some(e),
        }
    }
}

impl From<statcast_api::Error> for DugoutError {
    fn from(e: statcast_api::Error) -> Self {
        Self::Upstream(UpstreamError::Statcast(e))
    }
}

impl From<crate::registry::RegistryError> for DugoutError {
    fn from(e: crate::registry::RegistryError) -> Self {
        Self::Upstream(UpstreamError::Registry(e))
    }
}

impl From<crate::fangraphs::FangraphsError> for DugoutError {
    fn from(e: crate::fangraphs::FangraphsError) -> Self {
        Self::Upstream(UpstreamError::SeasonStats(e))
    }
}
