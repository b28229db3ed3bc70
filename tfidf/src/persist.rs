use crate::{CorpusError, CorpusSnapshot, Result};
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Locations of the corpus file and the stopword file.
#[derive(Debug, Clone)]
pub struct CorpusPaths {
    pub corpus: PathBuf,
    pub stopwords: PathBuf,
}

impl CorpusPaths {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(corpus: P, stopwords: Q) -> Self {
        Self { corpus: corpus.as_ref().to_path_buf(), stopwords: stopwords.as_ref().to_path_buf() }
    }

    /// `corpus.txt` and `stopwords.txt` under `root`.
    pub fn in_dir<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self::new(root.join("corpus.txt"), root.join("stopwords.txt"))
    }
}

/// Parse the corpus format: a document count line, then one `term: count` line per term.
///
/// The count is taken after the last `:` so terms that themselves contain a colon survive.
pub fn parse_corpus<R: BufRead>(reader: R) -> Result<CorpusSnapshot> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(CorpusError::format(1, "missing document count")),
    };
    let num_docs: u64 = header
        .trim()
        .parse()
        .map_err(|_| CorpusError::format(1, format!("invalid document count {:?}", header.trim())))?;

    let mut term_num_docs = HashMap::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line_no = idx + 2;
        let (term, count) = line
            .rsplit_once(':')
            .ok_or_else(|| CorpusError::format(line_no, "missing ':' separator"))?;
        let count: u64 = count
            .trim()
            .parse()
            .map_err(|_| CorpusError::format(line_no, format!("invalid frequency {:?}", count.trim())))?;
        if count == 0 || count > num_docs {
            return Err(CorpusError::format(line_no, format!("frequency {count} outside 1..={num_docs}")));
        }
        term_num_docs.insert(term.trim().to_string(), count);
    }
    Ok(CorpusSnapshot { num_docs, term_num_docs })
}

pub fn write_corpus<W: Write>(mut writer: W, snapshot: &CorpusSnapshot) -> Result<()> {
    writeln!(writer, "{}", snapshot.num_docs)?;
    for (term, count) in &snapshot.term_num_docs {
        writeln!(writer, "{term}: {count}")?;
    }
    writer.flush()?;
    Ok(())
}

/// One stopword per line, trimmed. Blank lines are kept as empty entries.
pub fn parse_stopwords<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        words.push(line?.trim().to_string());
    }
    Ok(words)
}

pub fn write_stopwords<W: Write>(mut writer: W, words: &[String]) -> Result<()> {
    for word in words {
        writeln!(writer, "{word}")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<CorpusSnapshot> {
    let path = path.as_ref();
    let snapshot = parse_corpus(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), num_docs = snapshot.num_docs, num_terms = snapshot.term_num_docs.len(), "loaded corpus");
    Ok(snapshot)
}

pub fn save_corpus<P: AsRef<Path>>(path: P, snapshot: &CorpusSnapshot) -> Result<()> {
    let path = path.as_ref();
    let f = create_with_parents(path)?;
    write_corpus(BufWriter::new(f), snapshot)?;
    tracing::info!(path = %path.display(), num_docs = snapshot.num_docs, num_terms = snapshot.term_num_docs.len(), "saved corpus");
    Ok(())
}

pub fn load_stopwords<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let words = parse_stopwords(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), count = words.len(), "loaded stopwords");
    Ok(words)
}

pub fn save_stopwords<P: AsRef<Path>>(path: P, words: &[String]) -> Result<()> {
    let path = path.as_ref();
    let f = create_with_parents(path)?;
    write_stopwords(BufWriter::new(f), words)?;
    tracing::info!(path = %path.display(), count = words.len(), "saved stopwords");
    Ok(())
}

fn create_with_parents(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            create_dir_all(dir)?;
        }
    }
    Ok(File::create(path)?)
}
