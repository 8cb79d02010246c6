//! FairScore Scoring Engine
//!
//! Maps a [`FeatureVector`](fairscore_core::FeatureVector) to a score in
//! `[300, 900]` together with the per-feature contribution breakdown.
//! The mapping is a fixed weighted sum; it never fails.

pub mod engine;

pub use engine::{Contribution, ScoreResult, ScoringEngine, SCORING_VERSION, WEIGHTS};
