//! Per-article "nutrition" scoring.
//!
//! Independent of clustering: a scorer looks at one document at a time and
//! can run before or after clustering, on every member or only on
//! representatives.

pub mod readability;
pub mod scoring;
pub mod sentiment;
pub mod types;

pub use scoring::{score_cluster, NutritionScorer, Scorer};
pub use sentiment::Sentiment;
pub use types::{ClusterNutrition, ScoreReport};
