use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use search_engine::duplicates::remove_duplicates;
use search_engine::paginator::paginate;
use search_engine::process_queries::{process_queries, process_queries_joined};
use search_engine::request_queue::RequestQueue;
use search_engine::{DocId, DocumentStatus, ExecutionPolicy, Rating, SearchServer};
use serde::Deserialize;
use serde_json::json;
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Load documents into an in-memory TF-IDF engine and query it", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct CorpusArgs {
    /// Input path (JSON/JSONL file or directory)
    #[arg(long)]
    pub input: String,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    pub stop_words: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the top documents for a query
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long)]
        query: String,
        /// Only documents with this status (ACTUAL, IRRELEVANT, BANNED, REMOVED)
        #[arg(long, value_parser = parse_status, default_value = "ACTUAL")]
        status: DocumentStatus,
        /// Scan words in parallel
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Print hits grouped into pages of this size
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// List the query words present in one document
    Match {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Remove documents whose word sets repeat an earlier document
    Dedup {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Run every line of a query file against the corpus
    Batch {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// File with one query per line
        #[arg(long)]
        queries: String,
        /// Print all hits as one list instead of one list per query
        #[arg(long, default_value_t = false)]
        joined: bool,
    },
}

fn parse_status(value: &str) -> std::result::Result<DocumentStatus, String> {
    match value.to_ascii_uppercase().as_str() {
        "ACTUAL" => Ok(DocumentStatus::Actual),
        "IRRELEVANT" => Ok(DocumentStatus::Irrelevant),
        "BANNED" => Ok(DocumentStatus::Banned),
        "REMOVED" => Ok(DocumentStatus::Removed),
        other => Err(format!("unknown status {other}")),
    }
}

fn policy(parallel: bool) -> ExecutionPolicy {
    if parallel {
        ExecutionPolicy::Parallel
    } else {
        ExecutionPolicy::Sequential
    }
}

pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Commands::Search { corpus, query, status, parallel, page_size } => {
            let server = load_corpus(&corpus)?;
            let hits = server.find_top_documents_with_policy(policy(parallel), &query, status.predicate())?;
            match page_size {
                Some(page_size) if !hits.is_empty() => {
                    for page in &paginate(&hits, page_size)? {
                        writeln!(out, "{}", serde_json::to_string(&*page)?)?;
                    }
                }
                _ => {
                    for hit in &hits {
                        writeln!(out, "{}", serde_json::to_string(hit)?)?;
                    }
                }
            }
        }
        Commands::Match { corpus, query, id, parallel } => {
            let server = load_corpus(&corpus)?;
            let matched = server.match_document_with_policy(policy(parallel), &query, id)?;
            writeln!(out, "{}", json!({ "id": id, "status": matched.status, "words": matched.words }))?;
        }
        Commands::Dedup { corpus } => {
            let mut server = load_corpus(&corpus)?;
            for id in remove_duplicates(&mut server) {
                writeln!(out, "{}", json!({ "removed": id }))?;
            }
            writeln!(out, "{}", json!({ "remaining": server.document_count() }))?;
        }
        Commands::Batch { corpus, queries, joined } => {
            let server = load_corpus(&corpus)?;
            let queries = read_queries(Path::new(&queries))?;
            if joined {
                for hit in process_queries_joined(&server, &queries)? {
                    writeln!(out, "{}", serde_json::to_string(&hit)?)?;
                }
            } else {
                for hits in process_queries(&server, &queries)? {
                    writeln!(out, "{}", serde_json::to_string(&hits)?)?;
                }
            }

            let mut tracker = RequestQueue::new(&server);
            for query in &queries {
                tracker.add_find_request(query)?;
            }
            writeln!(
                out,
                "{}",
                json!({ "queries": queries.len(), "no_result_requests": tracker.no_result_requests() })
            )?;
        }
    }
    Ok(())
}

pub fn load_corpus(args: &CorpusArgs) -> Result<SearchServer> {
    let mut server = SearchServer::from_stop_words_text(&args.stop_words).context("invalid stop words")?;
    let files = collect_input_files(Path::new(&args.input));
    if files.is_empty() {
        bail!("no JSON or JSONL input found at {}", args.input);
    }
    for file in &files {
        for doc in read_documents(file)? {
            server
                .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
                .with_context(|| format!("document {} in {}", doc.id, file.display()))?;
        }
    }
    tracing::info!(num_docs = server.document_count(), files = files.len(), "loaded corpus");
    Ok(server)
}

/// A single file as given, or every .json/.jsonl file under a directory in path order.
pub fn collect_input_files(input_path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }
    files
}

pub fn read_documents(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut docs = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: InputDoc =
                serde_json::from_str(&line).with_context(|| format!("{}:{}", file.display(), line_no + 1))?;
            docs.push(doc);
        }
        return Ok(docs);
    }

    let json: serde_json::Value =
        serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            arr.into_iter().map(|v| Ok(serde_json::from_value(v)?)).collect::<Result<Vec<InputDoc>>>()
        }
        serde_json::Value::Object(_) => Ok(vec![serde_json::from_value(json)?]),
        _ => Ok(Vec::new()),
    }
}

pub fn read_queries(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(text.lines().filter(|line| !line.trim().is_empty()).map(str::to_owned).collect())
}
