//! Record types flowing through the linker.
//!
//! This module contains the data model:
//! - `word` - OCR word boxes (WordBoxRecord)
//! - `sentence` - parsed sentences and their token geometry (SentenceRecord)
//! - `region` - detection regions and assembled region groups (RegionGroupRecord)
//! - `kind` - the region type tag and its grouping policy (RegionType)

pub mod kind;
pub mod region;
pub mod sentence;
pub mod word;

// Re-export main types for convenience
pub use kind::{GroupPolicy, RegionType};
pub use region::{DetectionRegion, RegionGroupRecord};
pub use sentence::{AlignedTokenRecord, DocumentSentences, SentenceRecord, TokenGeometry};
pub use word::{LineSpan, WordBoxRecord};
