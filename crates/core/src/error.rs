//! Error types for cosmos-link.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::RegionType;

/// Which per-document input file a [`LinkError::MissingResource`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    WordBoxes,
    DetectionRegions,
    Sentences,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ResourceKind::WordBoxes => "word-box stream",
            ResourceKind::DetectionRegions => "detection region list",
            ResourceKind::Sentences => "sentence file",
        })
    }
}

/// The ways the word-box stream and the parsed sentences can fall out of step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Fewer parsed tokens than word boxes for the document.
    TokenDeficit { tokens: usize, words: usize },
    /// A sentence's geometry arrays disagree with its token count.
    GeometryLength {
        sentence_id: u64,
        tokens: usize,
        lengths: [usize; 5],
    },
    /// Tokens remain but every word box has been consumed.
    StreamExhausted { sentence_id: u64, token: String },
    /// The reconciliation buffer grew past its cap without matching.
    BufferOverflow {
        sentence_id: u64,
        buffered: usize,
        expected: String,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::TokenDeficit { tokens, words } => write!(
                f,
                "{} parsed tokens but {} word boxes",
                tokens, words
            ),
            Violation::GeometryLength {
                sentence_id,
                tokens,
                lengths,
            } => write!(
                f,
                "sentence {}: {} tokens, geometry lengths {:?}",
                sentence_id, tokens, lengths
            ),
            Violation::StreamExhausted { sentence_id, token } => write!(
                f,
                "sentence {}: word-box stream exhausted at token {:?}",
                sentence_id, token
            ),
            Violation::BufferOverflow {
                sentence_id,
                buffered,
                expected,
            } => write!(
                f,
                "sentence {}: {} buffered tokens never matched {:?}",
                sentence_id, buffered, expected
            ),
        }
    }
}

/// Primary error type for alignment and assembly.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("missing {kind}: {}", path.display())]
    MissingResource { kind: ResourceKind, path: PathBuf },

    #[error("alignment invariant violated in {document}: {violation}")]
    AlignmentInvariant {
        document: String,
        violation: Violation,
    },

    #[error("{document}: {groups} region groups but {regions} detection regions")]
    RegionCountMismatch {
        document: String,
        groups: usize,
        regions: usize,
    },

    #[error("{region_type} regions have no grouping policy")]
    UnsupportedTarget { region_type: RegionType },

    #[error("{document}: detection region {index} is out of reading order")]
    RegionOrderViolation { document: String, index: usize },

    #[error("symbol extraction failed: {0}")]
    SymbolExtraction(String),

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker pool: {0}")]
    ThreadPool(String),
}

impl LinkError {
    /// True for errors that abort the whole corpus run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LinkError::SymbolExtraction(_))
    }
}

/// Convenience Result type alias for LinkError.
pub type Result<T> = std::result::Result<T, LinkError>;
