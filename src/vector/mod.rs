// Text vectorization and pairwise similarity
pub mod similarity;
pub mod tfidf;
pub mod tokenize;
pub mod types;

pub use similarity::{feature_similarity, SimilarityMatrix};
pub use tfidf::TfIdfVectorizer;
pub use tokenize::{is_stop_word, tokenize};
pub use types::FeatureVector;
