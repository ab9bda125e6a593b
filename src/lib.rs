//! Deckmatch - swipe-deck matching engine for a card-based dating app
//!
//! This library provides the matching and presentation pipeline behind a
//! swipe-card feed: compatibility scoring, multi-criteria candidate
//! filtering and ranking, a gesture state machine with animation timing,
//! a daily like quota, photo pagination and mutual-match evaluation.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{
    distance_km, haversine_km, FeedSession, FilterPipeline, GestureThresholds, MatchEvaluator,
    ScoringWeights, SessionOptions, SwipeGestureController,
};
pub use models::{
    FilterCriteria, MatchReason, MatchResult, Profile, RankedCandidate, UserPreferences,
};
