//! Dugout library layer: baseball matchup analytics over external
//! providers.
//!
//! Wraps the `statcast_api` pitch-log client with player resolution,
//! season-aggregate caching, at-bat reconstruction, outcome
//! classification, and the aggregation/percentile computations behind
//! each query handler.

pub mod atbat;
pub mod cache;
pub mod error;
pub mod fangraphs;
pub mod league;
pub mod metrics;
pub mod outcome;
pub mod portrait;
pub mod queries;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod validation;

pub use statcast_api;
pub use statcast_api::types::PitchEvent;
pub use statcast_api::PitchLogQuery;

pub use error::{DugoutError, UpstreamError};
pub use resolver::{Handedness, PlayerRecord, Resolver, SearchResult};
pub use service::{DugoutService, ServiceConfig};
