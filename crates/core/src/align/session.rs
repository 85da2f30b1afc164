//! Alignment state for one document.

use crate::error::Violation;
use crate::model::{SentenceRecord, TokenGeometry, WordBoxRecord};
use crate::utils::tokens;

use super::equivalence::{ReconciliationBuffer, same};

/// Cursor and reconciliation buffer over one document's word-box stream.
///
/// The cursor only moves forward and is shared by every sentence of the
/// document: sentence boundaries in the parsed text need not line up with
/// OCR line boundaries. The buffer is shared the same way.
#[derive(Debug)]
pub struct AlignmentSession<'w> {
    words: &'w [WordBoxRecord],
    cursor: usize,
    buffer: ReconciliationBuffer,
    max_buffer_tokens: usize,
}

impl<'w> AlignmentSession<'w> {
    pub fn new(words: &'w [WordBoxRecord], max_buffer_tokens: usize) -> Self {
        Self {
            words,
            cursor: 0,
            buffer: ReconciliationBuffer::default(),
            max_buffer_tokens,
        }
    }

    /// Index of the next unconsumed word box.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Word boxes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.words.len() - self.cursor
    }

    /// Parsed tokens currently held in the reconciliation buffer.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Aligns one parsed token and returns the word box it is placed on.
    ///
    /// The box is returned whether or not the token completes it: a token
    /// that only partially spells the current OCR word still sits inside
    /// that word's box.
    pub fn step(&mut self, sentence_id: u64, token: &str) -> Result<&'w WordBoxRecord, Violation> {
        let words = self.words;
        let word = words
            .get(self.cursor)
            .ok_or_else(|| Violation::StreamExhausted {
                sentence_id,
                token: token.to_string(),
            })?;

        if same(token, &word.text) {
            self.advance();
            return Ok(word);
        }

        self.buffer.push(token);
        if self.buffer.matches(&word.text) {
            self.advance();
        } else if self.buffer.len() > self.max_buffer_tokens {
            return Err(Violation::BufferOverflow {
                sentence_id,
                buffered: self.buffer.len(),
                expected: word.text.clone(),
            });
        }
        Ok(word)
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.buffer.clear();
    }

    /// Aligns every token of `sentence`, filling its geometry, and returns
    /// the symbolic form of each token.
    pub fn align_sentence(
        &mut self,
        sentence: &mut SentenceRecord,
    ) -> Result<Vec<Option<String>>, Violation> {
        let n = sentence.token_count();
        let mut geometry = TokenGeometry::with_capacity(n);
        let mut forms = Vec::with_capacity(n);
        for token in tokens(&sentence.text) {
            let word = self.step(sentence.id, token)?;
            geometry.push(word);
            forms.push(word.symbolic_form.clone());
        }
        sentence.token_geometry = geometry;
        Ok(forms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Rect;

    fn word(text: &str, x: f64) -> WordBoxRecord {
        WordBoxRecord::new(text, Rect::new(x, 0.0, x + 10.0, 10.0), 1)
    }

    #[test]
    fn test_exact_tokens_advance_one_each() {
        let words = vec![word("a", 0.0), word("b", 20.0)];
        let mut s = AlignmentSession::new(&words, 4);
        assert_eq!(s.step(1, "a").unwrap().text, "a");
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.step(1, "b").unwrap().text, "b");
        assert_eq!(s.cursor(), 2);
        assert_eq!(s.remaining(), 0);
    }

    #[test]
    fn test_partial_token_keeps_cursor() {
        let words = vec![word("(x)", 0.0), word("y", 20.0)];
        let mut s = AlignmentSession::new(&words, 4);
        s.step(1, "(x").unwrap();
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.buffered(), 1);
        s.step(1, ")").unwrap();
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.buffered(), 0);
    }

    #[test]
    fn test_exhausted_stream() {
        let words = vec![word("a", 0.0)];
        let mut s = AlignmentSession::new(&words, 4);
        s.step(7, "a").unwrap();
        let err = s.step(7, "b").unwrap_err();
        assert_eq!(
            err,
            Violation::StreamExhausted {
                sentence_id: 7,
                token: "b".to_string()
            }
        );
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_buffer_cap() {
        let words = vec![word("zzz", 0.0)];
        let mut s = AlignmentSession::new(&words, 2);
        s.step(3, "a").unwrap();
        s.step(3, "b").unwrap();
        let err = s.step(3, "c").unwrap_err();
        assert!(matches!(err, Violation::BufferOverflow { buffered: 3, .. }));
    }
}
