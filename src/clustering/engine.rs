use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info};

use super::assembler::assemble;
use super::config::EngineConfig;
use super::partition::partition;
use super::types::Clustering;
use crate::document::{AdmissionReport, Document};
use crate::error::{Result, SiftError};
use crate::vector::{SimilarityMatrix, TfIdfVectorizer};
use crate::TARGET_CLUSTER;

/// Groups a batch of articles by textual similarity.
///
/// The engine keeps no state between calls: every call fits its own
/// vocabulary and owns its own forest, so one engine can serve independent
/// batches from several threads.
#[derive(Debug, Clone)]
pub struct ClusterEngine {
    config: EngineConfig,
}

impl ClusterEngine {
    /// Validates `config` up front; an invalid threshold never reaches a batch.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Clusters an already admitted batch.
    ///
    /// # Returns
    /// * `Ok(Clustering)` - Every document in exactly one cluster
    /// * `Err(InvariantViolation)` - If two documents share an id
    /// * `Err(EmptyCorpus)` - If the batch is empty or holds only stop words
    pub fn cluster(&self, documents: Vec<Document>) -> Result<Clustering> {
        let start = Instant::now();
        check_unique_ids(&documents)?;

        if documents.is_empty() {
            return Err(SiftError::EmptyCorpus("no documents to cluster".to_string()));
        }

        let texts: Vec<&str> = documents.iter().map(Document::text).collect();
        let (vectorizer, vectors) = TfIdfVectorizer::fit_transform(&texts)?;
        debug!(
            target: TARGET_CLUSTER,
            "Vectorized {} documents over {} terms",
            vectors.len(),
            vectorizer.vocabulary_size()
        );

        let matrix = SimilarityMatrix::build(&vectors);

        let ids: Vec<String> = documents.iter().map(|d| d.id().to_string()).collect();
        let mut forest = partition(&ids, &matrix, self.config.similarity_threshold)?;
        let clustering = assemble(&mut forest, documents)?;

        info!(
            target: TARGET_CLUSTER,
            "Found {} clusters among {} documents in {:.2?}",
            clustering.len(),
            clustering.document_count(),
            start.elapsed()
        );

        Ok(clustering)
    }

    /// Runs the admission filter, then clusters whatever survives.
    pub fn admit_and_cluster(&self, documents: Vec<Document>) -> Result<(Clustering, AdmissionReport)> {
        let (admitted, report) = self.config.admission_filter().admit(documents);
        let clustering = self.cluster(admitted)?;
        Ok((clustering, report))
    }
}

fn check_unique_ids(documents: &[Document]) -> Result<()> {
    let mut seen = HashSet::with_capacity(documents.len());
    for document in documents {
        if document.id().is_empty() {
            return Err(SiftError::InvariantViolation(
                "document with empty id".to_string(),
            ));
        }
        if !seen.insert(document.id()) {
            return Err(SiftError::InvariantViolation(format!(
                "duplicate document id {}",
                document.id()
            )));
        }
    }
    Ok(())
}
