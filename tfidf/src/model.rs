use crate::persist::{load_corpus, load_stopwords, save_corpus, save_stopwords, CorpusPaths};
use crate::tokenizer::{distinct_terms, tokenize};
use crate::{CorpusSnapshot, Keyword, ModelConfig, Result};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Document-frequency statistics over a corpus, with IDF lookup and keyword ranking.
#[derive(Debug, Clone, Default)]
pub struct CorpusModel {
    num_docs: u64,
    term_num_docs: HashMap<String, u64>,
    stopwords: HashSet<String>,
    config: ModelConfig,
}

impl CorpusModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Build a model from already-parsed data: an optional corpus snapshot and stopword list.
    pub fn from_parts(config: ModelConfig, snapshot: Option<CorpusSnapshot>, stopwords: Option<Vec<String>>) -> Self {
        let mut model = Self::new(config);
        if let Some(snapshot) = snapshot {
            model.import(snapshot);
        }
        if let Some(words) = stopwords {
            model.stopwords = words.into_iter().collect();
        }
        model
    }

    /// Load the corpus and stopword files when given, then build the model.
    pub fn open(config: ModelConfig, corpus: Option<&Path>, stopwords: Option<&Path>) -> Result<Self> {
        let snapshot = corpus.map(load_corpus).transpose()?;
        let stopwords = stopwords.map(load_stopwords).transpose()?;
        Ok(Self::from_parts(config, snapshot, stopwords))
    }

    pub fn config(&self) -> &ModelConfig { &self.config }
    pub fn num_docs(&self) -> u64 { self.num_docs }
    pub fn num_terms(&self) -> usize { self.term_num_docs.len() }
    pub fn document_frequency(&self, term: &str) -> Option<u64> { self.term_num_docs.get(term).copied() }
    pub fn is_stopword(&self, term: &str) -> bool { self.stopwords.contains(term) }

    /// Count one more document; each distinct term is counted once regardless of repeats.
    pub fn add_document(&mut self, text: &str) {
        let terms = distinct_terms(text);
        self.num_docs += 1;
        let distinct = terms.len();
        for term in terms {
            *self.term_num_docs.entry(term).or_insert(0) += 1;
        }
        tracing::debug!(num_docs = self.num_docs, distinct, "ingested document");
    }

    /// IDF of `term`, matched case-sensitively against the stored terms.
    ///
    /// Stopwords always score 0, unknown terms get the configured default,
    /// everything else `ln((1 + N) / (1 + df))`.
    pub fn get_idf(&self, term: &str) -> f64 {
        if self.stopwords.contains(term) {
            return 0.0;
        }
        match self.term_num_docs.get(term) {
            None => self.config.default_idf,
            Some(&df) => ((1 + self.num_docs) as f64 / (1 + df) as f64).ln(),
        }
    }

    /// Every distinct term of `text` with its tf-idf score, highest first.
    ///
    /// Term frequency is normalized by the number of distinct terms in the document.
    /// Equal scores keep the order in which the terms first appear.
    pub fn get_document_keywords(&self, text: &str) -> Vec<Keyword> {
        let tokens = tokenize(text);
        let mut first_seen: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for token in &tokens {
            let count = counts.entry(token.as_str()).or_insert(0);
            if *count == 0 {
                first_seen.push(token.as_str());
            }
            *count += 1;
        }
        if first_seen.is_empty() {
            return Vec::new();
        }

        let distinct = first_seen.len() as f64;
        let mut keywords: Vec<Keyword> = first_seen
            .into_iter()
            .map(|term| {
                let tf = counts[term] as f64 / distinct;
                Keyword { term: term.to_string(), score: tf * self.get_idf(term) }
            })
            .collect();
        keywords.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        keywords
    }

    pub fn top_keywords(&self, text: &str, k: usize) -> Vec<Keyword> {
        let mut keywords = self.get_document_keywords(text);
        keywords.truncate(k);
        keywords
    }

    pub fn export(&self) -> CorpusSnapshot {
        CorpusSnapshot { num_docs: self.num_docs, term_num_docs: self.term_num_docs.clone() }
    }

    /// Replace the corpus statistics with `snapshot`. Stopwords are left untouched.
    pub fn import(&mut self, snapshot: CorpusSnapshot) {
        self.num_docs = snapshot.num_docs;
        self.term_num_docs = snapshot.term_num_docs;
    }

    /// Stopword candidates at the configured threshold.
    pub fn stopword_candidates(&self) -> Vec<String> {
        self.stopword_candidates_with(self.config.stopword_percentage_threshold)
    }

    /// Terms by descending document frequency, up to the first one that falls
    /// below `threshold * num_docs`. Equal frequencies are ordered by term.
    pub fn stopword_candidates_with(&self, threshold: f64) -> Vec<String> {
        let mut sorted: Vec<(&String, u64)> = self.term_num_docs.iter().map(|(t, &n)| (t, n)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let cutoff = threshold * self.num_docs as f64;
        sorted
            .into_iter()
            .take_while(|(_, n)| *n as f64 >= cutoff)
            .map(|(t, _)| t.clone())
            .collect()
    }

    /// Write the corpus file and the stopword candidate file.
    pub fn save(&self, paths: &CorpusPaths) -> Result<()> {
        save_corpus(&paths.corpus, &self.export())?;
        save_stopwords(&paths.stopwords, &self.stopword_candidates())?;
        Ok(())
    }
}
