//! Per-document input files.
//!
//! A corpus is three directories keyed by document name:
//! - `words/<name>.html.json` - the OCR word-box stream
//! - `equations/<name>.html.json` - detection regions, in group order
//! - `sentences/<name>.json` - parsed sentences ([`DocumentSentences`])

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{LinkError, ResourceKind, Result};
use crate::model::{DetectionRegion, DocumentSentences, WordBoxRecord};

/// Suffix shared by word-box and region files.
pub const HTML_JSON_SUFFIX: &str = ".html.json";

/// Reads and parses one JSON resource, mapping a missing file to
/// [`LinkError::MissingResource`].
fn read_json<T: DeserializeOwned>(path: &Path, kind: ResourceKind) -> Result<T> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LinkError::MissingResource {
                kind,
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&data).map_err(|source| LinkError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn word_file(words_dir: &Path, name: &str) -> PathBuf {
    words_dir.join(format!("{}{}", name, HTML_JSON_SUFFIX))
}

pub fn region_file(regions_dir: &Path, name: &str) -> PathBuf {
    regions_dir.join(format!("{}{}", name, HTML_JSON_SUFFIX))
}

/// Loads the word-box stream of `name` in OCR emission order, without the
/// words the OCR stage tagged as equation content.
pub fn load_word_boxes(words_dir: &Path, name: &str) -> Result<Vec<WordBoxRecord>> {
    let path = word_file(words_dir, name);
    let words: Vec<WordBoxRecord> = read_json(&path, ResourceKind::WordBoxes)?;
    let total = words.len();
    let words: Vec<WordBoxRecord> = words
        .into_iter()
        .filter(|w| !w.region_type.is_equation())
        .collect();
    debug!(
        document = name,
        total,
        kept = words.len(),
        "loaded word boxes"
    );
    Ok(words)
}

/// Loads the detection region list of `name`, in the order groups will be
/// paired with it.
pub fn load_detection_regions(regions_dir: &Path, name: &str) -> Result<Vec<DetectionRegion>> {
    read_json(&region_file(regions_dir, name), ResourceKind::DetectionRegions)
}

/// Loads one sentence file.
pub fn load_sentences(path: &Path) -> Result<DocumentSentences> {
    read_json(path, ResourceKind::Sentences)
}

/// Where a corpus lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLayout {
    pub sentences_dir: PathBuf,
    pub words_dir: Option<PathBuf>,
    pub regions_dir: Option<PathBuf>,
}

impl CorpusLayout {
    pub fn new(sentences_dir: impl Into<PathBuf>) -> Self {
        Self {
            sentences_dir: sentences_dir.into(),
            words_dir: None,
            regions_dir: None,
        }
    }

    pub fn with_words(mut self, dir: impl Into<PathBuf>) -> Self {
        self.words_dir = Some(dir.into());
        self
    }

    pub fn with_regions(mut self, dir: impl Into<PathBuf>) -> Self {
        self.regions_dir = Some(dir.into());
        self
    }

    /// Sentence files of the corpus, sorted by file name.
    pub fn sentence_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.sentences_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LinkError::MissingResource {
                    kind: ResourceKind::Sentences,
                    path: self.sentences_dir.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Every document of the corpus, ordered by document id.
    pub fn load_documents(&self) -> Result<Vec<DocumentSentences>> {
        let mut docs = self
            .sentence_files()?
            .iter()
            .map(|p| load_sentences(p))
            .collect::<Result<Vec<_>>>()?;
        docs.sort_by_key(|d| d.id);
        Ok(docs)
    }
}
