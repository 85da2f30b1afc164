//! High-level API module for corpus linking.
//!
//! # Example
//!
//! ```ignore
//! use cosmos_link_core::api::{LinkerBuilder, link_document};
//!
//! let batch = link_document(doc, Some(&words), Some(&regions), &Default::default())?;
//! ```

pub mod builder;
pub mod high_level;

// Re-export for convenience
pub use builder::LinkerBuilder;
pub use high_level::{
    LinkOptions, LinkSummary, is_ignored, link_corpus, link_document, link_documents,
    process_document,
};
