pub mod clustering;
pub mod document;
pub mod environment;
pub mod error;
pub mod logging;
pub mod nutrition;
pub mod vector;

pub use clustering::{Cluster, ClusterEngine, Clustering, EngineConfig};
pub use document::{Document, Metadata, RawArticle};
pub use error::{Result, SiftError};
pub use nutrition::{NutritionScorer, ScoreReport, Scorer};

pub const TARGET_CLUSTER: &str = "cluster";
pub const TARGET_VECTOR: &str = "vector";
pub const TARGET_ADMISSION: &str = "admission";
pub const TARGET_NUTRITION: &str = "nutrition";
