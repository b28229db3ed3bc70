use crate::{CorpusModel, CorpusSnapshot, Keyword};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle to a [`CorpusModel`] shared between threads.
///
/// Ingestion holds the write lock for the whole update, so readers see either
/// none or all of a document's counts.
#[derive(Clone, Default)]
pub struct SharedCorpusModel {
    inner: Arc<RwLock<CorpusModel>>,
}

impl SharedCorpusModel {
    pub fn new(model: CorpusModel) -> Self {
        Self { inner: Arc::new(RwLock::new(model)) }
    }

    pub fn add_document(&self, text: &str) {
        self.inner.write().add_document(text);
    }

    pub fn import(&self, snapshot: CorpusSnapshot) {
        self.inner.write().import(snapshot);
    }

    pub fn get_idf(&self, term: &str) -> f64 {
        self.inner.read().get_idf(term)
    }

    pub fn get_document_keywords(&self, text: &str) -> Vec<Keyword> {
        self.inner.read().get_document_keywords(text)
    }

    pub fn export(&self) -> CorpusSnapshot {
        self.inner.read().export()
    }

    pub fn stopword_candidates(&self) -> Vec<String> {
        self.inner.read().stopword_candidates()
    }

    pub fn num_docs(&self) -> u64 {
        self.inner.read().num_docs()
    }

    /// Run `f` against a consistent view of the model.
    pub fn with_model<T>(&self, f: impl FnOnce(&CorpusModel) -> T) -> T {
        f(&self.inner.read())
    }
}
