use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod error;
pub mod model;
pub mod persist;
pub mod shared;
pub mod tokenizer;

pub use error::{CorpusError, Result};
pub use model::CorpusModel;
pub use shared::SharedCorpusModel;

pub const DEFAULT_IDF: f64 = 1.5;
pub const DEFAULT_STOPWORD_PERCENTAGE_THRESHOLD: f64 = 0.01;

/// Flat export of the corpus statistics: total documents plus per-term document frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    pub num_docs: u64,
    pub term_num_docs: HashMap<String, u64>,
}

/// A term of a document paired with its tf-idf score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Returned by `get_idf` for terms missing from the corpus.
    #[serde(default = "default_idf")]
    pub default_idf: f64,
    /// Fraction of documents a term must appear in to be emitted as a stopword candidate.
    #[serde(default = "default_threshold")]
    pub stopword_percentage_threshold: f64,
}

fn default_idf() -> f64 { DEFAULT_IDF }
fn default_threshold() -> f64 { DEFAULT_STOPWORD_PERCENTAGE_THRESHOLD }

impl Default for ModelConfig {
    fn default() -> Self {
        Self { default_idf: DEFAULT_IDF, stopword_percentage_threshold: DEFAULT_STOPWORD_PERCENTAGE_THRESHOLD }
    }
}

impl ModelConfig {
    pub fn with_default_idf(mut self, default_idf: f64) -> Self {
        self.default_idf = default_idf;
        self
    }

    pub fn with_stopword_threshold(mut self, threshold: f64) -> Self {
        self.stopword_percentage_threshold = threshold;
        self
    }
}
