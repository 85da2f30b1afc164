//! Builder pattern for corpus linking.
//!
//! Provides a fluent API for configuring and running the linker.
//!
//! # Example
//! ```ignore
//! use cosmos_link_core::api::LinkerBuilder;
//! use cosmos_link_core::store::JsonLinesSink;
//!
//! let sink = JsonLinesSink::create("out/linked")?;
//! let summary = LinkerBuilder::new("out/sentences")
//!     .words("out/words")
//!     .regions("out/equations")
//!     .ignore(["broken.html"])
//!     .parallel(8)
//!     .run(&sink)?;
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::loader::CorpusLayout;
use crate::model::RegionType;
use crate::params::{LinkParams, RegionOrdering};
use crate::store::RecordSink;

use super::high_level::{LinkOptions, LinkSummary, link_corpus};

/// A builder for configuring a corpus run.
///
/// This wraps the underlying `CorpusLayout` and `LinkOptions`.
#[derive(Debug, Clone)]
pub struct LinkerBuilder {
    sentences: PathBuf,
    words: Option<PathBuf>,
    regions: Option<PathBuf>,
    ignored: HashSet<String>,
    threads: Option<usize>,
    params: LinkParams,
}

impl LinkerBuilder {
    /// Creates a new LinkerBuilder reading sentence files from `sentences`.
    pub fn new(sentences: impl AsRef<Path>) -> Self {
        Self {
            sentences: sentences.as_ref().to_path_buf(),
            words: None,
            regions: None,
            ignored: HashSet::new(),
            threads: None,
            params: LinkParams::default(),
        }
    }

    /// Enables the alignment pass with word-box files from `dir`.
    pub fn words(mut self, dir: impl AsRef<Path>) -> Self {
        self.words = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Enables the assembly pass with detection region files from `dir`.
    pub fn regions(mut self, dir: impl AsRef<Path>) -> Self {
        self.regions = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds document names to skip.
    ///
    /// # Example
    /// ```ignore
    /// let builder = LinkerBuilder::new("out/sentences")
    ///     .ignore(["a.html", "b"]);
    /// ```
    pub fn ignore<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the worker count. Use 1 or less for a single worker.
    pub fn parallel(mut self, thread_count: usize) -> Self {
        self.threads = Some(thread_count.max(1));
        self
    }

    /// Caps the reconciliation buffer.
    pub fn max_buffer_tokens(mut self, n: usize) -> Self {
        self.params.max_buffer_tokens = n.max(1);
        self
    }

    /// Sets the region type assembled into groups.
    ///
    /// A type without a grouping policy makes `run` fail once the assembly
    /// pass is enabled.
    pub fn target_region(mut self, region_type: RegionType) -> Self {
        self.params.target_region = region_type;
        self
    }

    /// Sets the validation applied to region lists before pairing.
    pub fn region_ordering(mut self, ordering: RegionOrdering) -> Self {
        self.params.region_ordering = ordering;
        self
    }

    /// Replaces all linking parameters.
    pub fn params(mut self, params: LinkParams) -> Self {
        self.params = params;
        self
    }

    /// The corpus layout this builder describes.
    pub fn layout(&self) -> CorpusLayout {
        CorpusLayout {
            sentences_dir: self.sentences.clone(),
            words_dir: self.words.clone(),
            regions_dir: self.regions.clone(),
        }
    }

    /// The run options this builder describes.
    pub fn options(&self) -> LinkOptions {
        LinkOptions {
            params: self.params.clone(),
            ignored: self.ignored.clone(),
            threads: self.threads,
        }
    }

    /// Runs the linker over the corpus, committing into `sink`.
    pub fn run(&self, sink: &dyn RecordSink) -> Result<LinkSummary> {
        link_corpus(&self.layout(), sink, &self.options())
    }
}
