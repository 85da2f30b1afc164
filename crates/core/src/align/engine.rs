//! Document-level token alignment.

use tracing::debug;

use crate::error::{LinkError, Result, Violation};
use crate::model::{AlignedTokenRecord, SentenceRecord, WordBoxRecord};
use crate::params::LinkParams;

use super::session::AlignmentSession;

/// Result of aligning one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAlignment {
    /// One record per aligned sentence, in alignment order.
    pub tokens: Vec<AlignedTokenRecord>,
    /// Word boxes consumed by the cursor.
    pub words_consumed: usize,
    /// Word boxes available to the cursor.
    pub words_total: usize,
}

/// Aligns the tokens of every non-equation sentence against `words`.
///
/// Sentences are processed in slice order (callers sort by sentence id) and
/// get their `token_geometry` filled in place. Equation sentences are left
/// untouched; their words are not part of the stream.
pub fn align_document(
    document: &str,
    sentences: &mut [SentenceRecord],
    words: &[WordBoxRecord],
    params: &LinkParams,
) -> Result<DocumentAlignment> {
    let fail = |violation: Violation| LinkError::AlignmentInvariant {
        document: document.to_string(),
        violation,
    };

    let token_total: usize = sentences
        .iter()
        .filter(|s| !s.region_type.is_equation())
        .map(SentenceRecord::token_count)
        .sum();
    if token_total < words.len() {
        return Err(fail(Violation::TokenDeficit {
            tokens: token_total,
            words: words.len(),
        }));
    }

    let mut session = AlignmentSession::new(words, params.max_buffer_tokens);
    let mut aligned = Vec::new();
    for sentence in sentences.iter_mut() {
        if sentence.region_type.is_equation() {
            continue;
        }
        let forms = session.align_sentence(sentence).map_err(fail)?;
        aligned.push(AlignedTokenRecord {
            document_id: sentence.document_id,
            sentence_id: sentence.id,
            section_id: sentence.section_id,
            paragraph_id: sentence.paragraph_id,
            region_type: sentence.region_type.clone(),
            text: sentence.text.clone(),
            tokens: forms,
        });
    }

    for sentence in sentences.iter().filter(|s| !s.region_type.is_equation()) {
        let n = sentence.token_count();
        if !sentence.token_geometry.is_consistent_with(n) {
            return Err(fail(Violation::GeometryLength {
                sentence_id: sentence.id,
                tokens: n,
                lengths: sentence.token_geometry.lengths(),
            }));
        }
    }

    debug!(
        document,
        tokens = token_total,
        consumed = session.cursor(),
        unconsumed = session.remaining(),
        "aligned document"
    );

    Ok(DocumentAlignment {
        tokens: aligned,
        words_consumed: session.cursor(),
        words_total: words.len(),
    })
}
