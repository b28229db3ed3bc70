use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tfidf::persist::CorpusPaths;
use tfidf::{CorpusModel, Keyword, ModelConfig, DEFAULT_IDF, DEFAULT_STOPWORD_PERCENTAGE_THRESHOLD};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    body: String,
}

impl InputDoc {
    fn text(&self) -> String {
        match &self.title {
            Some(title) => format!("{title}\n{}", self.body),
            None => self.body.clone(),
        }
    }
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a tf-idf corpus and query IDF weights and document keywords", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ModelArgs {
    /// Corpus file to seed the model from
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Stopword file, one term per line
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// IDF returned for terms missing from the corpus
    #[arg(long, default_value_t = DEFAULT_IDF)]
    default_idf: f64,
}

impl ModelArgs {
    fn open(&self, config: ModelConfig) -> Result<CorpusModel> {
        let config = config.with_default_idf(self.default_idf);
        CorpusModel::open(config, self.corpus.as_deref(), self.stopwords.as_deref())
            .with_context(|| format!("loading corpus {:?} / stopwords {:?}", self.corpus, self.stopwords))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest documents from a file or directory and save the corpus
    Build {
        /// Input path (file or directory of .txt, .json or .jsonl files)
        #[arg(long)]
        input: PathBuf,
        /// Output corpus file
        #[arg(long)]
        corpus_out: PathBuf,
        /// Output stopword candidate file
        #[arg(long)]
        stopwords_out: PathBuf,
        /// Minimum document fraction for a stopword candidate
        #[arg(long, default_value_t = DEFAULT_STOPWORD_PERCENTAGE_THRESHOLD)]
        stopword_threshold: f64,
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Print the IDF of each term
    Idf {
        #[command(flatten)]
        model: ModelArgs,
        /// Terms to look up, matched as given
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Rank the terms of a document by tf-idf
    Keywords {
        #[command(flatten)]
        model: ModelArgs,
        /// Document text
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,
        /// Read the document from a file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Only print the best k terms
        #[arg(long)]
        top: Option<usize>,
        /// Print a JSON array instead of tab-separated lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, corpus_out, stopwords_out, stopword_threshold, model } => {
            let config = ModelConfig::default().with_stopword_threshold(stopword_threshold);
            let mut corpus = model.open(config)?;
            build_corpus(&mut corpus, &input)?;
            corpus
                .save(&CorpusPaths::new(&corpus_out, &stopwords_out))
                .with_context(|| format!("saving corpus to {}", corpus_out.display()))?;
            tracing::info!(num_docs = corpus.num_docs(), num_terms = corpus.num_terms(), "corpus build complete");
            Ok(())
        }
        Commands::Idf { model, terms } => {
            let corpus = model.open(ModelConfig::default())?;
            write_idf(&mut io::stdout().lock(), &corpus, &terms)
        }
        Commands::Keywords { model, text, file, top, json } => {
            let corpus = model.open(ModelConfig::default())?;
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?,
                (None, None) => anyhow::bail!("either --text or --file is required"),
            };
            let keywords = match top {
                Some(k) => corpus.top_keywords(&text, k),
                None => corpus.get_document_keywords(&text),
            };
            write_keywords(&mut io::stdout().lock(), &keywords, json)
        }
    }
}

/// Ingest every supported file under `input` into `corpus`; returns the number of documents added.
fn build_corpus(corpus: &mut CorpusModel, input: &Path) -> Result<usize> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("txt" | "json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input {} does not exist", input.display());
    }

    let mut added = 0;
    for file in files {
        let n = match extension(&file) {
            Some("jsonl") => index_jsonl(corpus, &file),
            Some("json") => index_json(corpus, &file),
            _ => index_text(corpus, &file),
        }
        .with_context(|| format!("indexing {}", file.display()))?;
        tracing::info!(file = %file.display(), docs = n, "ingested file");
        added += n;
    }
    Ok(added)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn index_text(corpus: &mut CorpusModel, file: &Path) -> Result<usize> {
    let body = fs::read_to_string(file)?;
    corpus.add_document(&body);
    Ok(1)
}

fn index_jsonl(corpus: &mut CorpusModel, file: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(file)?);
    let mut n = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)?;
        ingest_doc(corpus, doc);
        n += 1;
    }
    Ok(n)
}

fn index_json(corpus: &mut CorpusModel, file: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let mut n = 0;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)?;
                ingest_doc(corpus, doc);
                n += 1;
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)?;
            ingest_doc(corpus, doc);
            n += 1;
        }
        _ => {}
    }
    Ok(n)
}

fn ingest_doc(corpus: &mut CorpusModel, doc: InputDoc) {
    tracing::debug!(id = doc.id.as_deref().unwrap_or(""), "ingesting document");
    corpus.add_document(&doc.text());
}

fn write_idf<W: Write>(out: &mut W, corpus: &CorpusModel, terms: &[String]) -> Result<()> {
    for term in terms {
        writeln!(out, "{term}\t{}", corpus.get_idf(term))?;
    }
    Ok(())
}

fn write_keywords<W: Write>(out: &mut W, keywords: &[Keyword], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, keywords)?;
        writeln!(out)?;
    } else {
        for k in keywords {
            writeln!(out, "{}\t{:.6}", k.term, k.score)?;
        }
    }
    Ok(())
}
