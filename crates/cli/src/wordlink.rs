//! wordlink - Attach OCR word geometry to parsed sentences
//!
//! A command line tool that aligns every non-equation sentence of a corpus
//! with the OCR word-box stream of its document and writes the sentences,
//! with per-token geometry, plus per-token symbolic forms as JSON lines.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use cosmos_link_core::api::LinkerBuilder;
use cosmos_link_core::params::DEFAULT_MAX_BUFFER_TOKENS;
use cosmos_link_core::store::JsonLinesSink;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Aligns parsed sentences with OCR word boxes.
#[derive(Parser, Debug)]
#[command(name = "wordlink")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of word coordinate files (<name>.html.json)
    #[arg(long = "words-dir", default_value = "out/words/")]
    words_dir: PathBuf,

    /// Directory of sentence files (<name>.json)
    #[arg(long = "sentences-dir", default_value = "out/sentences/")]
    sentences_dir: PathBuf,

    /// Directory the JSON-lines output is written to
    #[arg(short = 'o', long, default_value = "out/linked/")]
    output: PathBuf,

    /// Documents to skip, by name or name.html
    #[arg(long = "ignored-files", num_args = 1..)]
    ignored_files: Vec<String>,

    /// Number of worker threads (defaults to number of CPUs)
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Parsed tokens the reconciliation buffer may hold before a document
    /// is rejected
    #[arg(long = "max-buffer-tokens", default_value_t = DEFAULT_MAX_BUFFER_TOKENS)]
    max_buffer_tokens: usize,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let sink = JsonLinesSink::create(&args.output)
        .with_context(|| format!("failed to create output in {}", args.output.display()))?;

    let mut builder = LinkerBuilder::new(&args.sentences_dir)
        .words(&args.words_dir)
        .ignore(args.ignored_files.iter().cloned())
        .max_buffer_tokens(args.max_buffer_tokens);
    if let Some(n) = args.threads {
        builder = builder.parallel(n);
    }

    let summary = builder.run(&sink).context("word linking failed")?;
    sink.flush()?;

    info!(
        documents = summary.documents,
        skipped = summary.skipped,
        sentences = summary.sentences,
        output = %sink.dir().display(),
        "done"
    );
    Ok(())
}
