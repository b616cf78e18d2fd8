// Core algorithm exports
pub mod connections;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod status;

pub use connections::{
    apply_decision, direction_for, normalize_message, validate_new_request, ConnectionError,
    Decision, MAX_MESSAGE_LEN,
};
pub use distance::haversine_miles;
pub use filters::{matches_query, matches_service, ServiceFilter};
pub use matcher::{Matcher, RankResult};
pub use scoring::{match_score, match_variant, MatchVariant, ScoreError};
pub use status::{availability, occupancy_level, occupancy_ratio, Availability, OccupancyLevel};
