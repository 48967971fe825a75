pub mod admission;
pub mod source;
pub mod types;

pub use admission::{AdmissionFilter, AdmissionReport, Rejection, AD_MARKER, MIN_TEXT_CHARS};
pub use source::{parse_articles, ArticleSource, JsonFileSource};
pub use types::{Document, Metadata, RawArticle};
