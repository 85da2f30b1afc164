//! Token equivalence between the parsed text and the OCR text.
//!
//! The markup parser and the OCR engine disagree on compatibility characters
//! (ligatures, full-width forms) and on which dash a hyphenated word uses.
//! Both sides are NFKC-normalized and every dash-like character folds to an
//! ASCII hyphen before comparison.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

/// Canonical dash every dash-like character folds to.
pub const CANONICAL_DASH: char = '-';

#[inline]
pub fn is_dash(c: char) -> bool {
    matches!(
        c,
        '-' | '\u{2010}' // hyphen
            | '\u{2011}' // non-breaking hyphen
            | '\u{2012}' // figure dash
            | '\u{2013}' // en dash
            | '\u{2014}' // em dash
            | '\u{2015}' // horizontal bar
            | '\u{2212}' // minus sign
            | '\u{FE58}'
            | '\u{FE63}'
            | '\u{FF0D}'
    )
}

/// Normal form used for every comparison.
pub fn normalize(s: &str) -> Cow<'_, str> {
    // NFKC is the identity on ASCII, and the only ASCII dash is canonical.
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.nfkc()
            .map(|c| if is_dash(c) { CANONICAL_DASH } else { c })
            .collect(),
    )
}

/// The equivalence relation used to match a parsed token against OCR text.
pub fn same(parsed: &str, ocr: &str) -> bool {
    parsed == ocr || normalize(parsed) == normalize(ocr)
}

/// Parsed tokens accumulated while an OCR word is split across several of
/// them.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationBuffer {
    pieces: Vec<String>,
}

impl ReconciliationBuffer {
    pub fn push(&mut self, token: &str) {
        self.pieces.push(normalize(token).into_owned());
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// Number of buffered parsed tokens.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Buffered tokens joined with no separator.
    pub fn joined(&self) -> String {
        self.pieces.concat()
    }

    /// Buffered tokens joined with line-break hyphens removed: a piece ending
    /// in a dash loses it when another piece follows.
    fn dehyphenated(&self) -> Option<String> {
        let (last, init) = self.pieces.split_last()?;
        if !init.iter().any(|p| p.ends_with(CANONICAL_DASH)) {
            return None;
        }
        let mut out = String::with_capacity(self.pieces.iter().map(String::len).sum());
        for p in init {
            out.push_str(p.strip_suffix(CANONICAL_DASH).unwrap_or(p));
        }
        out.push_str(last);
        Some(out)
    }

    /// Whether the buffered run spells `ocr`.
    pub fn matches(&self, ocr: &str) -> bool {
        if self.pieces.is_empty() {
            return false;
        }
        let target = normalize(ocr);
        if self.joined() == target {
            return true;
        }
        self.dehyphenated().is_some_and(|d| d == target)
    }
}
