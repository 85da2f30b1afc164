//! Region group assembly.
//!
//! Sentences of one region type are folded into groups keyed by
//! (section, paragraph). Group `k` of a document is paired with detection
//! region `k`: the region list is produced upstream in the same reading order
//! in which groups are discovered here, and nothing checks their content
//! against each other.

use std::cmp::Ordering;

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use crate::error::{LinkError, Result};
use crate::model::{
    DetectionRegion, DocumentSentences, GroupPolicy, RegionGroupRecord, RegionType, SentenceRecord,
};
use crate::params::{LinkParams, RegionOrdering};
use crate::symbols::symbols_or_none;
use crate::utils::{HasBBox, page_then_top};

/// Sentences sharing a (section, paragraph) key, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup<'s> {
    pub section_id: u64,
    pub paragraph_id: u64,
    pub sentences: Vec<&'s SentenceRecord>,
}

impl RegionGroup<'_> {
    pub fn text(&self, separator: &str) -> String {
        self.sentences.iter().map(|s| s.text.as_str()).join(separator)
    }
}

/// Partitions the sentences of `region_type` by (section, paragraph),
/// keeping first-seen group order and sentence order within each group.
pub fn group_sentences<'s>(
    sentences: &'s [SentenceRecord],
    region_type: &RegionType,
) -> Vec<RegionGroup<'s>> {
    let mut groups: IndexMap<(u64, u64), Vec<&'s SentenceRecord>> = IndexMap::new();
    for s in sentences.iter().filter(|s| &s.region_type == region_type) {
        groups
            .entry((s.section_id, s.paragraph_id))
            .or_default()
            .push(s);
    }
    groups
        .into_iter()
        .map(|((section_id, paragraph_id), sentences)| RegionGroup {
            section_id,
            paragraph_id,
            sentences,
        })
        .collect()
}

/// Forward-only cursor over a document's detection regions.
#[derive(Debug)]
pub struct RegionCursor<'r> {
    regions: &'r [DetectionRegion],
    next: usize,
}

impl<'r> RegionCursor<'r> {
    pub fn new(regions: &'r [DetectionRegion]) -> Self {
        Self { regions, next: 0 }
    }

    /// Regions handed out so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl<'r> Iterator for RegionCursor<'r> {
    type Item = &'r DetectionRegion;

    fn next(&mut self) -> Option<Self::Item> {
        let region = self.regions.get(self.next)?;
        self.next += 1;
        Some(region)
    }
}

/// Checks the region list against `ordering`.
pub fn validate_order(
    document: &str,
    regions: &[DetectionRegion],
    ordering: RegionOrdering,
) -> Result<()> {
    let out_of_order = |prev: &DetectionRegion, cur: &DetectionRegion| match ordering {
        RegionOrdering::Unchecked => false,
        RegionOrdering::PageMonotonic => cur.page() < prev.page(),
        RegionOrdering::PageThenTop => page_then_top(prev, cur) == Ordering::Greater,
    };
    if let Some(index) = regions
        .windows(2)
        .position(|w| out_of_order(&w[0], &w[1]))
    {
        return Err(LinkError::RegionOrderViolation {
            document: document.to_string(),
            index: index + 1,
        });
    }
    Ok(())
}

fn build_record(
    document_id: u64,
    region_type: &RegionType,
    policy: GroupPolicy,
    group: &RegionGroup<'_>,
    region: &DetectionRegion,
) -> RegionGroupRecord {
    let text = group.text(policy.separator);
    let symbols = if policy.extract_symbols {
        symbols_or_none(&text)
    } else {
        None
    };
    RegionGroupRecord {
        document_id,
        section_id: group.section_id,
        paragraph_id: group.paragraph_id,
        region_type: region_type.clone(),
        concatenated_text: text,
        symbols,
        bbox: region.rect(),
        page: region.page(),
    }
}

/// Assembles the region groups of `doc` and pairs them with `regions`.
///
/// The number of groups must equal the number of regions, and the target
/// region type must have a grouping policy.
pub fn assemble_regions(
    doc: &DocumentSentences,
    regions: &[DetectionRegion],
    params: &LinkParams,
) -> Result<Vec<RegionGroupRecord>> {
    let region_type = &params.target_region;
    let Some(policy) = region_type.group_policy() else {
        return Err(LinkError::UnsupportedTarget {
            region_type: region_type.clone(),
        });
    };

    let groups = group_sentences(&doc.sentences, region_type);
    if groups.len() != regions.len() {
        return Err(LinkError::RegionCountMismatch {
            document: doc.name.clone(),
            groups: groups.len(),
            regions: regions.len(),
        });
    }
    validate_order(&doc.name, regions, params.region_ordering)?;

    let mut cursor = RegionCursor::new(regions);
    let mut records = Vec::with_capacity(groups.len());
    for group in &groups {
        let region = cursor.next().ok_or_else(|| LinkError::RegionCountMismatch {
            document: doc.name.clone(),
            groups: groups.len(),
            regions: regions.len(),
        })?;
        records.push(build_record(doc.id, region_type, policy, group, region));
    }

    debug!(
        document = doc.name.as_str(),
        groups = records.len(),
        regions = cursor.consumed(),
        region_type = %region_type,
        "assembled region groups"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(id: u64, sec: u64, para: u64, text: &str) -> SentenceRecord {
        SentenceRecord::new(id, 1, sec, para, RegionType::Equation, text)
    }

    #[test]
    fn test_group_order_is_first_seen() {
        let sentences = vec![
            eq(1, 2, 1, "a"),
            eq(2, 1, 1, "b"),
            SentenceRecord::new(3, 1, 1, 1, RegionType::BodyText, "text"),
            eq(4, 2, 1, "c"),
        ];
        let groups = group_sentences(&sentences, &RegionType::Equation);
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].section_id, groups[0].paragraph_id), (2, 1));
        assert_eq!(groups[0].text(""), "ac");
        assert_eq!(groups[1].text(""), "b");
    }

    #[test]
    fn test_cursor_never_rewinds() {
        let regions = vec![
            DetectionRegion::new(0.0, 0.0, 1.0, 1.0, 1),
            DetectionRegion::new(0.0, 2.0, 1.0, 3.0, 1),
        ];
        let mut cursor = RegionCursor::new(&regions);
        assert_eq!(cursor.next().map(|r| r.ymin), Some(0.0));
        assert_eq!(cursor.next().map(|r| r.ymin), Some(2.0));
        assert!(cursor.next().is_none());
        assert_eq!(cursor.consumed(), 2);
    }

    #[test]
    fn test_validate_order() {
        let regions = vec![
            DetectionRegion::new(0.0, 50.0, 1.0, 60.0, 1),
            DetectionRegion::new(0.0, 10.0, 1.0, 20.0, 1),
            DetectionRegion::new(0.0, 5.0, 1.0, 8.0, 2),
        ];
        assert!(validate_order("d", &regions, RegionOrdering::Unchecked).is_ok());
        assert!(validate_order("d", &regions, RegionOrdering::PageMonotonic).is_ok());
        assert!(matches!(
            validate_order("d", &regions, RegionOrdering::PageThenTop),
            Err(LinkError::RegionOrderViolation { index: 1, .. })
        ));
    }
}
