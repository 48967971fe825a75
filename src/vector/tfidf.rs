use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use super::tokenize::tokenize;
use super::types::FeatureVector;
use crate::error::{Result, SiftError};
use crate::TARGET_VECTOR;

/// TF-IDF vectorizer fitted to a single batch of texts.
///
/// The vocabulary is indexed in lexicographic order, so the same ordered
/// input always produces the same vectors.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Learns vocabulary and IDF weights from `texts` and returns one
    /// L2-normalized vector per text, in input order.
    pub fn fit_transform<S: AsRef<str>>(texts: &[S]) -> Result<(Self, Vec<FeatureVector>)> {
        if texts.is_empty() {
            return Err(SiftError::EmptyCorpus("no documents to vectorize".to_string()));
        }

        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t.as_ref())).collect();

        // Document frequency per term; BTreeMap keeps the terms sorted
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(SiftError::EmptyCorpus(
                "empty vocabulary; the documents only contain stop words".to_string(),
            ));
        }

        // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
        let n = texts.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.iter().enumerate() {
            vocabulary.insert((*term).to_string(), idx);
            idf.push(((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0);
        }

        debug!(
            target: TARGET_VECTOR,
            "Built vocabulary of {} terms from {} documents",
            vocabulary.len(),
            texts.len()
        );

        let vectorizer = TfIdfVectorizer { vocabulary, idf };
        let vectors = tokenized
            .iter()
            .map(|tokens| vectorizer.weigh(tokens))
            .collect();

        Ok((vectorizer, vectors))
    }

    /// Vectorizes additional text against the fitted vocabulary.
    ///
    /// Terms unseen during fitting are ignored.
    pub fn transform(&self, text: &str) -> FeatureVector {
        self.weigh(&tokenize(text))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Index of `term` in the vocabulary, if it survived filtering
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx])
    }

    fn weigh(&self, tokens: &[String]) -> FeatureVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();
        entries.sort_unstable_by_key(|(idx, _)| *idx);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in entries.iter_mut() {
                *weight /= norm;
            }
        }

        FeatureVector::from_sorted(self.vocabulary.len(), entries)
    }
}
