use serde::{Deserialize, Serialize};

use crate::document::{AdmissionFilter, AD_MARKER, MIN_TEXT_CHARS};
use crate::environment::{get_env_var_parsed, get_env_var_raw};
use crate::error::{Result, SiftError};

/// Default minimum similarity for two articles to land in the same cluster
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

pub const SIMILARITY_THRESHOLD_ENV: &str = "SIFT_SIMILARITY_THRESHOLD";
pub const MIN_TEXT_CHARS_ENV: &str = "SIFT_MIN_TEXT_CHARS";
pub const AD_MARKER_ENV: &str = "SIFT_AD_MARKER";

/// Settings for one clustering engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pairs scoring at or above this are merged; must be within [0, 1]
    pub similarity_threshold: f64,
    pub min_text_chars: usize,
    pub ad_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            min_text_chars: MIN_TEXT_CHARS,
            ad_marker: AD_MARKER.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `SIFT_*` environment variables, validated.
    pub fn from_env() -> Result<Self> {
        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies any `SIFT_*` environment variables on top of `self`.
    ///
    /// Only parse failures are reported here; range checks are left to
    /// [`EngineConfig::validate`] so later overrides can still correct a value.
    /// The ad marker is read untrimmed since its surrounding spaces matter.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(threshold) = get_env_var_parsed::<f64>(SIMILARITY_THRESHOLD_ENV)? {
            self.similarity_threshold = threshold;
        }
        if let Some(min_chars) = get_env_var_parsed::<usize>(MIN_TEXT_CHARS_ENV)? {
            self.min_text_chars = min_chars;
        }
        if let Some(marker) = get_env_var_raw(AD_MARKER_ENV) {
            self.ad_marker = marker;
        }
        Ok(self)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    pub fn with_ad_marker(mut self, marker: impl Into<String>) -> Self {
        self.ad_marker = marker.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.similarity_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.similarity_threshold)
        {
            return Err(SiftError::Config(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }

        if self.min_text_chars == 0 {
            return Err(SiftError::Config(
                "min_text_chars must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn admission_filter(&self) -> AdmissionFilter {
        AdmissionFilter::new(self.min_text_chars, &self.ad_marker)
    }
}
