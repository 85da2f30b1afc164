//! Parsed sentences and the per-token geometry attached to them.

use serde::{Deserialize, Serialize};

use super::kind::RegionType;
use super::word::WordBoxRecord;
use crate::utils::tokens;

/// Parallel per-token geometry arrays.
///
/// Entry `k` of every array describes whitespace token `k` of the owning
/// sentence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenGeometry {
    pub top: Vec<f64>,
    pub left: Vec<f64>,
    pub bottom: Vec<f64>,
    pub right: Vec<f64>,
    pub page: Vec<u32>,
}

impl TokenGeometry {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            top: Vec::with_capacity(n),
            left: Vec::with_capacity(n),
            bottom: Vec::with_capacity(n),
            right: Vec::with_capacity(n),
            page: Vec::with_capacity(n),
        }
    }

    /// Appends the placement of `word`: vertical extent from its line,
    /// horizontal extent from the word itself.
    pub fn push(&mut self, word: &WordBoxRecord) {
        self.top.push(word.line.ymin);
        self.left.push(word.word_box.xmin);
        self.bottom.push(word.line.ymax);
        self.right.push(word.word_box.xmax);
        self.page.push(word.page);
    }

    pub fn lengths(&self) -> [usize; 5] {
        [
            self.top.len(),
            self.left.len(),
            self.bottom.len(),
            self.right.len(),
            self.page.len(),
        ]
    }

    /// True when all five arrays have exactly `n` entries.
    pub fn is_consistent_with(&self, n: usize) -> bool {
        self.lengths().iter().all(|&len| len == n)
    }

    pub fn is_empty(&self) -> bool {
        self.lengths().iter().all(|&len| len == 0)
    }
}

/// A sentence as produced by the markup parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub id: u64,
    pub document_id: u64,
    pub section_id: u64,
    pub paragraph_id: u64,
    #[serde(alias = "name")]
    pub region_type: RegionType,
    pub text: String,
    #[serde(default, skip_serializing_if = "TokenGeometry::is_empty")]
    pub token_geometry: TokenGeometry,
}

impl SentenceRecord {
    pub fn new(
        id: u64,
        document_id: u64,
        section_id: u64,
        paragraph_id: u64,
        region_type: RegionType,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            document_id,
            section_id,
            paragraph_id,
            region_type,
            text: text.into(),
            token_geometry: TokenGeometry::default(),
        }
    }

    pub fn token_count(&self) -> usize {
        tokens(&self.text).count()
    }
}

/// Symbolic forms of one sentence's tokens, in token order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTokenRecord {
    pub document_id: u64,
    pub sentence_id: u64,
    pub section_id: u64,
    pub paragraph_id: u64,
    pub region_type: RegionType,
    pub text: String,
    pub tokens: Vec<Option<String>>,
}

/// All sentences of one document, as laid out in the corpus sentence files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSentences {
    pub id: u64,
    pub name: String,
    pub sentences: Vec<SentenceRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::word::LineSpan;
    use crate::utils::Rect;

    #[test]
    fn test_push_uses_line_for_vertical_extent() {
        let w = WordBoxRecord::new("a", Rect::new(5.0, 12.0, 9.0, 20.0), 2).with_line(LineSpan {
            ymin: 10.0,
            ymax: 22.0,
        });
        let mut g = TokenGeometry::default();
        g.push(&w);
        assert_eq!(g.top, vec![10.0]);
        assert_eq!(g.left, vec![5.0]);
        assert_eq!(g.bottom, vec![22.0]);
        assert_eq!(g.right, vec![9.0]);
        assert_eq!(g.page, vec![2]);
        assert!(g.is_consistent_with(1));
    }

    #[test]
    fn test_sentence_accepts_name_alias() {
        let json = r#"{"id": 4, "document_id": 1, "section_id": 2, "paragraph_id": 3,
                       "name": "Equation", "text": "x = 1"}"#;
        let s: SentenceRecord = serde_json::from_str(json).unwrap();
        assert!(s.region_type.is_equation());
        assert_eq!(s.token_count(), 3);
        assert!(s.token_geometry.is_empty());
    }
}
