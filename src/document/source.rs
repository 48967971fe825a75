//! Article sources feeding the clustering engine.
//!
//! Discovery and download live outside this crate. A source hands over
//! articles that have already been fetched and parsed; anything that
//! failed upstream never shows up here.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::types::RawArticle;
use crate::error::Result;
use crate::TARGET_ADMISSION;

/// Yields fetched articles as `(url, text)` plus whatever metadata the source has.
pub trait ArticleSource {
    fn articles(&self) -> Result<Vec<RawArticle>>;
}

/// Reads a JSON array of articles from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Async variant for callers already running inside a tokio runtime.
    pub async fn load(&self) -> Result<Vec<RawArticle>> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_articles(&body)
    }
}

impl ArticleSource for JsonFileSource {
    fn articles(&self) -> Result<Vec<RawArticle>> {
        let body = std::fs::read_to_string(&self.path)?;
        parse_articles(&body)
    }
}

/// Parses a JSON array of articles, skipping entries with an empty url or body.
pub fn parse_articles(body: &str) -> Result<Vec<RawArticle>> {
    let articles: Vec<RawArticle> = serde_json::from_str(body)?;
    let total = articles.len();

    let usable: Vec<RawArticle> = articles
        .into_iter()
        .filter(|article| {
            let keep = !article.url.trim().is_empty() && !article.text.trim().is_empty();
            if !keep {
                warn!(target: TARGET_ADMISSION, "Skipping article without url or text: {:?}", article.title);
            }
            keep
        })
        .collect();

    info!(target: TARGET_ADMISSION, "Loaded {} of {} articles", usable.len(), total);
    Ok(usable)
}
