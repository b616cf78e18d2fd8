//! Haven Match - shelter matching and connection service for the Haven app
//!
//! This library provides the core matching logic used by the Haven
//! shelter/nutrition resource app: a 0-100 compatibility score between a
//! user's needs and each shelter, a filter/sort pipeline over the shelter
//! collection, and the connection-request state machine for the social
//! layer.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    match_score, match_variant, Matcher, RankResult, ScoreError, ServiceFilter,
};
pub use crate::models::{
    ConnectionRecord, ConnectionStatus, Direction, Preferences, ScoredShelter, ServiceTag, Shelter,
};
