use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Descriptive fields carried alongside an article. Clustering never reads these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    /// RFC3339 timestamp
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub top_image: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// A single article as seen by the clustering engine.
///
/// Fields are private so an admitted document cannot be altered; use the
/// accessors to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    text: String,
    #[serde(default)]
    metadata: Metadata,
}

impl Document {
    /// Creates a document with a freshly generated UUID v4 id.
    pub fn new(text: impl Into<String>, metadata: Metadata) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), text, metadata)
    }

    /// Creates a document with a caller-assigned id.
    pub fn with_id(id: impl Into<String>, text: impl Into<String>, metadata: Metadata) -> Self {
        Document {
            id: id.into(),
            text: text.into(),
            metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.metadata.url.as_deref()
    }
}

/// An article as delivered by an [`ArticleSource`](super::ArticleSource), before
/// it has been assigned an id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArticle {
    pub url: String,
    pub text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub top_image: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl RawArticle {
    /// Converts into a [`Document`] with a new UUID.
    ///
    /// Articles without a publish date are stamped with the current time.
    pub fn into_document(self) -> Document {
        let publish_date = self
            .publish_date
            .filter(|date| !date.trim().is_empty())
            .unwrap_or_else(|| Utc::now().to_rfc3339());

        let metadata = Metadata {
            title: self.title,
            url: Some(self.url),
            authors: self.authors,
            publish_date: Some(publish_date),
            top_image: self.top_image,
            keywords: self.keywords,
            summary: self.summary,
        };

        Document::new(self.text, metadata)
    }
}
