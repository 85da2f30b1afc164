//! Token alignment between parsed sentences and the OCR word-box stream.
//!
//! - `equivalence` - when a parsed token and an OCR word count as equal
//! - `session` - the per-document cursor and reconciliation buffer
//! - `engine` - the document pass and its invariant checks

pub mod engine;
pub mod equivalence;
pub mod session;

pub use engine::{DocumentAlignment, align_document};
pub use equivalence::{ReconciliationBuffer, normalize, same};
pub use session::AlignmentSession;
