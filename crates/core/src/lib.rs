//! cosmos-link - aligns OCR word boxes with parsed sentences and assembles
//! detected regions into structured records.

pub mod align;
pub mod api;
pub mod assemble;
pub mod error;
pub mod loader;
pub mod model;
pub mod params;
pub mod store;
pub mod symbols;
pub mod utils;

// Re-export high_level for convenience
pub use api::high_level;

pub use error::{LinkError, Result};
