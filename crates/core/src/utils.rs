//! Geometric helpers shared by the word-box and region models.
//!
//! Coordinates are page pixels with the origin at the top-left corner, so
//! `ymin` is the top edge and `ymax` the bottom edge.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// An axis-aligned box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Rect {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }
}

/// Trait for objects that sit on a page with a bounding box.
pub trait HasBBox {
    fn rect(&self) -> Rect;
    fn page(&self) -> u32;

    fn width(&self) -> f64 {
        let r = self.rect();
        r.xmax - r.xmin
    }

    fn height(&self) -> f64 {
        let r = self.rect();
        r.ymax - r.ymin
    }
}

/// Compares two placed objects by page, then by top edge.
pub fn page_then_top<A: HasBBox, B: HasBBox>(a: &A, b: &B) -> Ordering {
    a.page()
        .cmp(&b.page())
        .then_with(|| a.rect().ymin.total_cmp(&b.rect().ymin))
}

/// Splits `text` the way the sentence store counts tokens.
#[inline]
pub fn tokens(text: &str) -> std::str::SplitWhitespace<'_> {
    text.split_whitespace()
}
