//! tocseg - splits extracted documents into sections along their table of
//! contents and writes one JSON array of sections per document per line.

use anyhow::{Context, Result};
use clap::Parser;
use fuzzy_toc_segmenter::input::{self, DocumentInput};
use fuzzy_toc_segmenter::{
    SectionRecord, SegmentError, Segmenter, SegmenterBuilder, SegmenterConfig,
};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "tocseg")]
#[command(version)]
#[command(about = "Split extracted documents into sections along their table of contents", long_about = None)]
struct Cli {
    /// Document files or directories (searched recursively for *.json)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output file, truncated first (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Language tag for documents that do not carry one
    #[arg(short, long, default_value = "de")]
    language: String,

    /// JSON segmenter configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip TOC entries up to and including this one
    #[arg(long)]
    toc_marker: Option<String>,

    /// Tolerated edits per title character
    #[arg(long)]
    max_error_ratio: Option<f64>,

    /// Shortest title worth searching for
    #[arg(long)]
    min_title_len: Option<usize>,

    /// Ignore case when matching titles
    #[arg(long)]
    case_insensitive: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let segmenter = build_segmenter(&cli)?;
    debug!(?segmenter, "configured");

    let files = input::discover(&cli.paths)?;
    info!(documents = files.len(), "segmenting");

    let results: Vec<Option<Vec<SectionRecord>>> = files
        .par_iter()
        .map(|path| segment_file(&segmenter, path, &cli.language))
        .collect();

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut written = 0usize;
    for sections in results.into_iter().flatten() {
        serde_json::to_writer(&mut out, &sections)?;
        writeln!(out)?;
        written += 1;
    }
    out.flush()?;

    info!(written, skipped = files.len() - written, "done");
    Ok(())
}

fn build_segmenter(cli: &Cli) -> Result<Segmenter> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<SegmenterConfig>(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SegmenterConfig::default(),
    };
    if let Some(marker) = &cli.toc_marker {
        config.toc_marker = Some(marker.clone());
    }
    if let Some(ratio) = cli.max_error_ratio {
        config.max_error_ratio = ratio;
    }
    if let Some(len) = cli.min_title_len {
        config.min_title_len = len;
    }
    if cli.case_insensitive {
        config.case_insensitive = true;
    }
    Ok(SegmenterBuilder::from_config(config).build()?)
}

/// Segments one document; problems are logged and the document skipped so
/// the others still go through.
fn segment_file(
    segmenter: &Segmenter,
    path: &Path,
    language: &str,
) -> Option<Vec<SectionRecord>> {
    let document = match DocumentInput::load(path) {
        Ok(document) => document,
        Err(err) => {
            warn!("{err}");
            return None;
        }
    };

    let meta = document.meta(language);
    let backlog = segmenter.backlog(&document.toc);
    match segmenter.segment(meta, backlog, &document.pages) {
        Ok(result) => {
            debug!(
                path = %path.display(),
                sections = result.sections.len(),
                unmatched = result.unmatched_titles.len(),
                "segmented"
            );
            Some(result.sections)
        }
        Err(SegmentError::EmptyBacklog) => {
            warn!(path = %path.display(), title = %document.title, "no usable table of contents");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), "{err}");
            None
        }
    }
}
