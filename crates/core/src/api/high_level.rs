//! High-level linking API.
//!
//! Provides the main public API for running the linker over a corpus:
//! - `link_document()` - align and assemble one document in memory
//! - `process_document()` - the same, loading its word boxes and regions
//! - `link_corpus()` - every document of a corpus on a worker pool

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::align::align_document;
use crate::assemble::assemble_regions;
use crate::error::{LinkError, Result};
use crate::loader::{CorpusLayout, load_detection_regions, load_word_boxes};
use crate::model::{DetectionRegion, DocumentSentences, WordBoxRecord};
use crate::params::LinkParams;
use crate::store::{DocumentBatch, RecordSink};

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Options for a corpus run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkOptions {
    /// Alignment and assembly parameters.
    pub params: LinkParams,

    /// Document names to skip. `name` and `name.html` both match.
    pub ignored: HashSet<String>,

    /// Worker threads. None uses the available parallelism.
    pub threads: Option<usize>,
}

/// Counters for a finished corpus run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkSummary {
    pub documents: usize,
    pub skipped: usize,
    pub sentences: usize,
    pub regions: usize,
}

/// Whether `name` is on the ignore list.
pub fn is_ignored(name: &str, ignored: &HashSet<String>) -> bool {
    ignored.contains(name) || ignored.contains(&format!("{}.html", name))
}

/// Links one document whose inputs are already in memory.
///
/// `words` enables the alignment pass and `regions` the assembly pass.
/// Sentences are ordered by id before alignment.
pub fn link_document(
    mut doc: DocumentSentences,
    words: Option<&[WordBoxRecord]>,
    regions: Option<&[DetectionRegion]>,
    params: &LinkParams,
) -> Result<DocumentBatch> {
    doc.sentences.sort_by_key(|s| s.id);

    let mut batch = DocumentBatch {
        document_id: doc.id,
        name: doc.name.clone(),
        ..Default::default()
    };

    if let Some(words) = words {
        let alignment = align_document(&doc.name, &mut doc.sentences, words, params)?;
        batch.tokens = alignment.tokens;
    }
    if let Some(regions) = regions {
        batch.regions = assemble_regions(&doc, regions, params)?;
    }
    if words.is_some() {
        batch.sentences = doc.sentences;
    }
    Ok(batch)
}

/// Loads the word boxes and regions `layout` asks for, then links `doc`.
pub fn process_document(
    doc: DocumentSentences,
    layout: &CorpusLayout,
    params: &LinkParams,
) -> Result<DocumentBatch> {
    let words = match &layout.words_dir {
        Some(dir) => Some(load_word_boxes(dir, &doc.name)?),
        None => None,
    };

    let regions = match &layout.regions_dir {
        Some(dir) => match load_detection_regions(dir, &doc.name) {
            Ok(regions) => Some(regions),
            // A document without target sentences needs no region file.
            Err(LinkError::MissingResource { .. })
                if !doc
                    .sentences
                    .iter()
                    .any(|s| s.region_type == params.target_region) =>
            {
                Some(Vec::new())
            }
            Err(e) => return Err(e),
        },
        None => None,
    };

    link_document(doc, words.as_deref(), regions.as_deref(), params)
}

/// Links already-loaded documents, committing each to `sink`.
///
/// The first fatal error stops the run. A target region type without a
/// grouping policy is rejected before any document is processed when the
/// assembly pass is enabled.
pub fn link_documents(
    docs: Vec<DocumentSentences>,
    layout: &CorpusLayout,
    sink: &dyn RecordSink,
    options: &LinkOptions,
) -> Result<LinkSummary> {
    let target = &options.params.target_region;
    if layout.regions_dir.is_some() && target.group_policy().is_none() {
        return Err(LinkError::UnsupportedTarget {
            region_type: target.clone(),
        });
    }

    let thread_count = options.threads.unwrap_or_else(default_thread_count).max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| LinkError::ThreadPool(e.to_string()))?;

    let documents = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);
    let sentences = AtomicUsize::new(0);
    let regions = AtomicUsize::new(0);

    pool.install(|| {
        docs.into_par_iter().try_for_each(|doc| {
            if is_ignored(&doc.name, &options.ignored) {
                debug!(document = doc.name.as_str(), "ignored");
                skipped.fetch_add(1, Ordering::Relaxed);
                return Ok(());
            }
            let batch = process_document(doc, layout, &options.params)?;
            documents.fetch_add(1, Ordering::Relaxed);
            sentences.fetch_add(batch.sentences.len(), Ordering::Relaxed);
            regions.fetch_add(batch.regions.len(), Ordering::Relaxed);
            sink.commit(batch)
        })
    })?;

    let summary = LinkSummary {
        documents: documents.into_inner(),
        skipped: skipped.into_inner(),
        sentences: sentences.into_inner(),
        regions: regions.into_inner(),
    };
    info!(
        documents = summary.documents,
        skipped = summary.skipped,
        sentences = summary.sentences,
        regions = summary.regions,
        threads = thread_count,
        "corpus linked"
    );
    Ok(summary)
}

/// Links every document of the corpus at `layout`.
///
/// # Example
/// ```ignore
/// use cosmos_link_core::api::{LinkOptions, link_corpus};
/// use cosmos_link_core::loader::CorpusLayout;
/// use cosmos_link_core::store::JsonLinesSink;
///
/// let layout = CorpusLayout::new("out/sentences").with_words("out/words");
/// let sink = JsonLinesSink::create("out/linked")?;
/// let summary = link_corpus(&layout, &sink, &LinkOptions::default())?;
/// ```
pub fn link_corpus(
    layout: &CorpusLayout,
    sink: &dyn RecordSink,
    options: &LinkOptions,
) -> Result<LinkSummary> {
    let docs = layout.load_documents()?;
    debug!(documents = docs.len(), "loaded corpus");
    link_documents(docs, layout, sink, options)
}
