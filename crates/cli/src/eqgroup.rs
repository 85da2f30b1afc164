//! eqgroup - Assemble multi-line equations into located records
//!
//! A command line tool that folds equation sentences sharing a section and
//! paragraph into one record, pairs each record with the next detected
//! equation box of its document, and extracts the variables it uses.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use cosmos_link_core::api::LinkerBuilder;
use cosmos_link_core::model::RegionType;
use cosmos_link_core::params::RegionOrdering;
use cosmos_link_core::store::JsonLinesSink;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Region type to assemble.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Target {
    /// Equations, with variable extraction (default)
    #[default]
    Equation,
    /// Figures
    Figure,
    /// Tables
    Table,
}

impl From<Target> for RegionType {
    fn from(t: Target) -> Self {
        match t {
            Target::Equation => RegionType::Equation,
            Target::Figure => RegionType::Figure,
            Target::Table => RegionType::Table,
        }
    }
}

/// Check applied to each region list before pairing.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Ordering {
    /// Trust the detector's order (default)
    #[default]
    Unchecked,
    /// Pages never go backwards
    Page,
    /// Pages never go backwards and tops never move up within a page
    PageThenTop,
}

impl From<Ordering> for RegionOrdering {
    fn from(o: Ordering) -> Self {
        match o {
            Ordering::Unchecked => RegionOrdering::Unchecked,
            Ordering::Page => RegionOrdering::PageMonotonic,
            Ordering::PageThenTop => RegionOrdering::PageThenTop,
        }
    }
}

/// Groups region sentences and pairs them with detected boxes.
#[derive(Parser, Debug)]
#[command(name = "eqgroup")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of detection region files (<name>.html.json)
    #[arg(long = "regions-dir", default_value = "out/equations/")]
    regions_dir: PathBuf,

    /// Directory of sentence files (<name>.json)
    #[arg(long = "sentences-dir", default_value = "out/sentences/")]
    sentences_dir: PathBuf,

    /// Directory the JSON-lines output is written to
    #[arg(short = 'o', long, default_value = "out/regions/")]
    output: PathBuf,

    /// Region type to assemble
    #[arg(long, value_enum, default_value = "equation")]
    target: Target,

    /// Check applied to region lists before pairing
    #[arg(long = "region-ordering", value_enum, default_value = "unchecked")]
    region_ordering: Ordering,

    /// Documents to skip, by name or name.html
    #[arg(long = "ignored-files", num_args = 1..)]
    ignored_files: Vec<String>,

    /// Number of worker threads (defaults to number of CPUs)
    #[arg(short = 't', long)]
    threads: Option<usize>,

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
        .regions(&args.regions_dir)
        .target_region(args.target.into())
        .region_ordering(args.region_ordering.into())
        .ignore(args.ignored_files.iter().cloned());
    if let Some(n) = args.threads {
        builder = builder.parallel(n);
    }

    let summary = builder.run(&sink).context("region assembly failed")?;
    sink.flush()?;

    info!(
        documents = summary.documents,
        skipped = summary.skipped,
        regions = summary.regions,
        output = %sink.dir().display(),
        "done"
    );
    Ok(())
}
