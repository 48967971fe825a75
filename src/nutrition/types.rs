use serde::Serialize;

/// Per-article "nutrition label". All metrics run from 0 to 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Share of sentences containing a figure
    pub fact_density: f64,
    /// Strength of sentiment, either direction
    pub bias_content: f64,
    /// Subjectivity
    pub emotional_calories: f64,
    /// Breadth of named subjects
    pub perspective_vitamins: f64,
    /// Inverse of reading ease
    pub complexity_index: f64,
    /// Credibility of the publishing site
    pub source_minerals: f64,
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Mean scores over the members of one cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterNutrition {
    pub article_count: usize,
    pub fact_density: f64,
    pub bias_content: f64,
    pub emotional_calories: f64,
    pub perspective_vitamins: f64,
    pub complexity_index: f64,
    pub source_minerals: f64,
}

impl ClusterNutrition {
    /// Averages the reports; `None` for an empty slice.
    pub fn from_reports(reports: &[ScoreReport]) -> Option<Self> {
        if reports.is_empty() {
            return None;
        }

        let n = reports.len() as f64;
        let mean = |metric: fn(&ScoreReport) -> f64| round2(reports.iter().map(metric).sum::<f64>() / n);

        Some(Self {
            article_count: reports.len(),
            fact_density: mean(|r| r.fact_density),
            bias_content: mean(|r| r.bias_content),
            emotional_calories: mean(|r| r.emotional_calories),
            perspective_vitamins: mean(|r| r.perspective_vitamins),
            complexity_index: mean(|r| r.complexity_index),
            source_minerals: mean(|r| r.source_minerals),
        })
    }
}

/// Rounds to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
