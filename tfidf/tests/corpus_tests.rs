use std::path::PathBuf;
use tfidf::{CorpusModel, ModelConfig};

const DEFAULT_IDF_UNITTEST: f64 = 1.0;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn open(default_idf: f64, with_stopwords: bool) -> CorpusModel {
    let stopwords = with_stopwords.then(|| fixture("teststopwords.txt"));
    CorpusModel::open(
        ModelConfig::default().with_default_idf(default_idf),
        Some(fixture("testcorpus.txt").as_path()),
        stopwords.as_deref(),
    )
    .unwrap()
}

fn expected_idf(num_docs: u64, df: u64) -> f64 {
    ((1 + num_docs) as f64 / (1 + df) as f64).ln()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn idf_for_known_and_unknown_terms() {
    let m = open(DEFAULT_IDF_UNITTEST, false);
    assert_eq!(m.num_docs(), 50);
    assert_eq!(m.get_idf("nonexistent"), DEFAULT_IDF_UNITTEST);
    // lookups do not fold case
    assert_eq!(m.get_idf("THE"), DEFAULT_IDF_UNITTEST);
    assert!(m.get_idf("a") > m.get_idf("the"));
    assert_close(m.get_idf("girl"), m.get_idf("moon"));
    assert_close(m.get_idf("said"), expected_idf(50, 5));
}

#[test]
fn keywords_ranked_by_tfidf() {
    let m = open(0.01, false);

    let keywords = m.get_document_keywords("the spoon and the fork");
    assert_eq!(keywords[0].term, "the");

    let keywords = m.get_document_keywords("the girl said hello over the phone");
    let terms: Vec<&str> = keywords.iter().map(|k| k.term.as_str()).collect();
    assert_eq!(&terms[..4], &["girl", "phone", "said", "the"]);
    // unknown terms tie at the default weight and keep their order of appearance
    assert_eq!(&terms[4..], &["hello", "over"]);
    assert_close(keywords[3].score, 2.0 / 6.0 * expected_idf(50, 40));
}

#[test]
fn keywords_of_empty_document() {
    let m = open(0.01, false);
    assert!(m.get_document_keywords("").is_empty());
}

#[test]
fn adding_documents_updates_idf() {
    let mut m = open(DEFAULT_IDF_UNITTEST, false);
    assert_eq!(m.get_idf("water"), DEFAULT_IDF_UNITTEST);
    assert_close(m.get_idf("moon"), expected_idf(m.num_docs(), 1));
    assert_close(m.get_idf("said"), expected_idf(m.num_docs(), 5));

    m.add_document("water, moon");

    assert_eq!(m.num_docs(), 51);
    assert_close(m.get_idf("water"), expected_idf(m.num_docs(), 1));
    assert_close(m.get_idf("moon"), expected_idf(m.num_docs(), 2));
    assert_close(m.get_idf("said"), expected_idf(m.num_docs(), 5));
}

#[test]
fn no_corpus_files() {
    let mut m = CorpusModel::open(ModelConfig::default().with_default_idf(DEFAULT_IDF_UNITTEST), None, None).unwrap();
    for term in ["moon", "water", "said"] {
        assert_eq!(m.get_idf(term), DEFAULT_IDF_UNITTEST);
    }

    m.add_document("moon");
    m.add_document("moon said hello");

    assert_eq!(m.get_idf("water"), DEFAULT_IDF_UNITTEST);
    assert_close(m.get_idf("said"), expected_idf(m.num_docs(), 1));
    assert_close(m.get_idf("moon"), expected_idf(m.num_docs(), 2));
}

#[test]
fn stopword_file() {
    let mut m = open(DEFAULT_IDF_UNITTEST, true);
    assert_eq!(m.get_idf("water"), DEFAULT_IDF_UNITTEST);
    assert_eq!(m.get_idf("moon"), 0.0);
    assert_eq!(m.get_idf("the"), 0.0);
    assert_close(m.get_idf("said"), expected_idf(m.num_docs(), 5));

    m.add_document("moon");
    m.add_document("moon and water");

    assert_close(m.get_idf("water"), expected_idf(m.num_docs(), 1));
    assert_eq!(m.get_idf("moon"), 0.0);
    assert_close(m.get_idf("said"), expected_idf(m.num_docs(), 5));
}

#[test]
fn blank_stopword_lines_become_empty_stopwords() {
    let m = open(DEFAULT_IDF_UNITTEST, true);
    assert!(m.is_stopword(""));
    assert_eq!(m.get_idf(""), 0.0);
}

#[test]
fn stopword_candidates_from_fixture() {
    let m = open(DEFAULT_IDF_UNITTEST, false);
    assert_eq!(m.stopword_candidates_with(0.1), vec!["the", "a", "said"]);
    // every term clears the default 1% cutoff of a 50 document corpus
    assert_eq!(m.stopword_candidates().len(), m.num_terms());
}
