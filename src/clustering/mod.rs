// Module declarations
pub mod assembler;
pub mod config;
pub mod engine;
pub mod partition;
#[cfg(test)]
mod tests;
pub mod types;
pub mod union_find;

pub use types::*;

pub use assembler::assemble;
pub use config::{EngineConfig, DEFAULT_SIMILARITY_THRESHOLD};
pub use engine::ClusterEngine;
pub use partition::{partition, partition_in_order};
pub use union_find::DisjointSet;
