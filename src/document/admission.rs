use serde::Serialize;
use tracing::{debug, info};

use super::types::Document;
use crate::TARGET_ADMISSION;

/// Minimum number of characters of extracted text an article needs to be clustered
pub const MIN_TEXT_CHARS: usize = 250;

/// Delimiter left behind by inserted ad copy
pub const AD_MARKER: &str = " ad ";

/// Why an article was kept out of the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    TooShort,
    AdvertisementMarker,
}

/// Counts from one pass of the admission filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdmissionReport {
    pub received: usize,
    pub admitted: usize,
    pub too_short: usize,
    pub advertisement: usize,
}

impl AdmissionReport {
    pub fn rejected(&self) -> usize {
        self.too_short + self.advertisement
    }
}

/// Drops articles that are too short or carry embedded ad copy.
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    min_text_chars: usize,
    ad_marker: String,
}

impl Default for AdmissionFilter {
    fn default() -> Self {
        Self::new(MIN_TEXT_CHARS, AD_MARKER)
    }
}

impl AdmissionFilter {
    pub fn new(min_text_chars: usize, ad_marker: &str) -> Self {
        Self {
            min_text_chars,
            ad_marker: ad_marker.to_lowercase(),
        }
    }

    /// Returns the reason a document would be rejected, if any.
    pub fn check(&self, document: &Document) -> Option<Rejection> {
        let text = document.text();

        if text.chars().count() < self.min_text_chars {
            return Some(Rejection::TooShort);
        }

        if !self.ad_marker.is_empty() && text.to_lowercase().contains(&self.ad_marker) {
            return Some(Rejection::AdvertisementMarker);
        }

        None
    }

    /// Splits a batch into admitted documents, preserving their order.
    ///
    /// Rejected documents are dropped; only the counts survive in the report.
    pub fn admit(&self, documents: Vec<Document>) -> (Vec<Document>, AdmissionReport) {
        let mut report = AdmissionReport {
            received: documents.len(),
            ..Default::default()
        };

        let admitted: Vec<Document> = documents
            .into_iter()
            .filter(|document| match self.check(document) {
                None => true,
                Some(reason) => {
                    debug!(
                        target: TARGET_ADMISSION,
                        "Rejected document {} ({:?}, {} chars)",
                        document.id(),
                        reason,
                        document.text().chars().count()
                    );
                    match reason {
                        Rejection::TooShort => report.too_short += 1,
                        Rejection::AdvertisementMarker => report.advertisement += 1,
                    }
                    false
                }
            })
            .collect();

        report.admitted = admitted.len();
        info!(
            target: TARGET_ADMISSION,
            "Processed {} articles; usable: {}", report.received, report.admitted
        );

        (admitted, report)
    }
}
