use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use super::readability::flesch_reading_ease;
use super::sentiment;
use super::types::{round2, ClusterNutrition, ScoreReport};
use crate::clustering::Cluster;
use crate::document::Document;
use crate::vector::is_stop_word;
use crate::TARGET_NUTRITION;

/// Unique subjects needed for a full perspective score
const PERSPECTIVE_SATURATION: f64 = 10.0;

/// Credibility by site, first match wins
const SOURCE_CREDIBILITY: &[(&str, f64)] = &[("nytimes", 95.0), ("bbc", 90.0), ("cnn", 80.0)];
const DEFAULT_CREDIBILITY: f64 = 70.0;

static CAPITALIZED_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][\w'-]*(?:\s+[A-Z][\w'-]*)*").unwrap());

/// Scores a single article. Implementations must not depend on other articles.
pub trait Scorer: Send + Sync {
    fn score(&self, document: &Document) -> ScoreReport;
}

/// Stock scorer built from text statistics and a small sentiment lexicon
#[derive(Debug, Clone, Copy, Default)]
pub struct NutritionScorer;

impl NutritionScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Scorer for NutritionScorer {
    fn score(&self, document: &Document) -> ScoreReport {
        let text = document.text();
        let sentiment = sentiment::analyze(text);

        let report = ScoreReport {
            fact_density: fact_density(text),
            bias_content: round2(sentiment.polarity.abs() * 100.0),
            emotional_calories: round2(sentiment.subjectivity * 100.0),
            perspective_vitamins: perspective_vitamins(text),
            complexity_index: complexity_index(text),
            source_minerals: source_minerals(document.url().unwrap_or_default()),
            title: document.title().map(str::to_string),
            url: document.url().map(str::to_string),
        };

        debug!(target: TARGET_NUTRITION, "Scored document {}: {:?}", document.id(), report);
        report
    }
}

/// Scores every member of a cluster and averages the results.
pub fn score_cluster(scorer: &dyn Scorer, cluster: &Cluster) -> Option<ClusterNutrition> {
    let reports: Vec<ScoreReport> = cluster.members.iter().map(|doc| scorer.score(doc)).collect();
    ClusterNutrition::from_reports(&reports)
}

/// Percentage of `.`-separated fragments that contain a digit.
pub fn fact_density(text: &str) -> f64 {
    let fragments: Vec<&str> = text.split('.').collect();
    let with_figures = fragments
        .iter()
        .filter(|fragment| fragment.chars().any(|c| c.is_ascii_digit()))
        .count();
    round2(with_figures as f64 / fragments.len() as f64 * 100.0)
}

/// Distinct capitalized phrases, saturating at ten.
///
/// Capitalized runs stand in for noun phrases; a lone capitalized stop word
/// ("The", "But") is sentence-initial noise and is not counted.
pub fn perspective_vitamins(text: &str) -> f64 {
    let phrases: HashSet<String> = CAPITALIZED_RUN
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
        .filter(|phrase| phrase.contains(' ') || !is_stop_word(phrase))
        .collect();

    round2((phrases.len() as f64 / PERSPECTIVE_SATURATION * 100.0).min(100.0))
}

/// 100 minus Flesch reading ease, within [0, 100]; 0 for text without words.
pub fn complexity_index(text: &str) -> f64 {
    match flesch_reading_ease(text) {
        Some(ease) if ease <= 100.0 => round2((100.0 - ease).min(100.0)),
        _ => 0.0,
    }
}

pub fn source_minerals(url: &str) -> f64 {
    let url = url.to_lowercase();
    SOURCE_CREDIBILITY
        .iter()
        .find(|(site, _)| url.contains(site))
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_CREDIBILITY)
}
