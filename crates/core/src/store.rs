//! Persistence of linked records.
//!
//! Every document is committed as one [`DocumentBatch`] after its whole
//! alignment and assembly pass succeeded, so a failed document never leaves
//! partial output behind. Sinks are shared by all workers of a corpus run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;

use crate::error::{LinkError, Result};
use crate::model::{AlignedTokenRecord, RegionGroupRecord, SentenceRecord};

/// Everything produced for one document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentBatch {
    pub document_id: u64,
    pub name: String,
    /// Sentences with their geometry filled in.
    pub sentences: Vec<SentenceRecord>,
    pub tokens: Vec<AlignedTokenRecord>,
    pub regions: Vec<RegionGroupRecord>,
}

/// Append-only destination for document batches.
pub trait RecordSink: Send + Sync {
    fn commit(&self, batch: DocumentBatch) -> Result<()>;
}

/// Keeps committed batches in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<DocumentBatch>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed batches, sorted by document id.
    pub fn into_batches(self) -> Vec<DocumentBatch> {
        let mut batches = self
            .batches
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        batches.sort_by_key(|b| b.document_id);
        batches
    }

    pub fn len(&self) -> usize {
        self.batches.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSink for MemorySink {
    fn commit(&self, batch: DocumentBatch) -> Result<()> {
        self.batches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(batch);
        Ok(())
    }
}

pub const SENTENCES_FILE: &str = "sentences.jsonl";
pub const TOKENS_FILE: &str = "tokens.jsonl";
pub const REGIONS_FILE: &str = "regions.jsonl";

struct JsonLinesWriters {
    sentences: BufWriter<File>,
    tokens: BufWriter<File>,
    regions: BufWriter<File>,
}

/// Writes one JSON object per line into three files under a directory.
pub struct JsonLinesSink {
    dir: PathBuf,
    writers: Mutex<JsonLinesWriters>,
}

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(dir.join(name))?))
}

fn encode_lines<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for record in records {
        serde_json::to_writer(&mut out, record).map_err(|e| LinkError::Io(e.into()))?;
        out.push(b'\n');
    }
    Ok(out)
}

/// The three JSON-lines blocks of one batch: sentences, tokens, regions.
pub(crate) fn encode_batch(batch: &DocumentBatch) -> Result<[Vec<u8>; 3]> {
    Ok([
        encode_lines(&batch.sentences)?,
        encode_lines(&batch.tokens)?,
        encode_lines(&batch.regions)?,
    ])
}

impl JsonLinesSink {
    /// Creates `dir` if needed and truncates the three output files.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let writers = JsonLinesWriters {
            sentences: create(dir, SENTENCES_FILE)?,
            tokens: create(dir, TOKENS_FILE)?,
            regions: create(dir, REGIONS_FILE)?,
        };
        Ok(Self {
            dir: dir.to_path_buf(),
            writers: Mutex::new(writers),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn flush(&self) -> Result<()> {
        let mut w = self
            .writers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        w.sentences.flush()?;
        w.tokens.flush()?;
        w.regions.flush()?;
        Ok(())
    }
}

impl RecordSink for JsonLinesSink {
    fn commit(&self, batch: DocumentBatch) -> Result<()> {
        // Encoding happens outside the lock and before any byte is written.
        let [sentences, tokens, regions] = encode_batch(&batch)?;
        let mut w = self
            .writers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        w.sentences.write_all(&sentences)?;
        w.tokens.write_all(&tokens)?;
        w.regions.write_all(&regions)?;
        Ok(())
    }
}

impl Drop for JsonLinesSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
