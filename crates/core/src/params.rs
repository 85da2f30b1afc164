//! Linking parameters.
//!
//! Contains LinkParams struct for controlling alignment and assembly behavior.

use crate::model::RegionType;

/// Default cap on the reconciliation buffer, in parsed tokens.
pub const DEFAULT_MAX_BUFFER_TOKENS: usize = 32;

/// How strictly the detection region list is checked before groups are
/// paired with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionOrdering {
    /// Trust the upstream order.
    #[default]
    Unchecked,
    /// Pages must never go backwards.
    PageMonotonic,
    /// Pages must never go backwards, and within a page top edges must not
    /// move up.
    PageThenTop,
}

/// Parameters for alignment and region assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkParams {
    /// Number of parsed tokens the reconciliation buffer may hold before
    /// the document is declared desynchronized.
    pub max_buffer_tokens: usize,

    /// Region type assembled into region groups.
    pub target_region: RegionType,

    /// Validation applied to the detection region list before pairing.
    pub region_ordering: RegionOrdering,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            max_buffer_tokens: DEFAULT_MAX_BUFFER_TOKENS,
            target_region: RegionType::Equation,
            region_ordering: RegionOrdering::Unchecked,
        }
    }
}

impl LinkParams {
    /// Creates new linking parameters with the specified values.
    ///
    /// # Panics
    /// Panics if max_buffer_tokens is zero, or if target_region has no
    /// grouping policy.
    pub fn new(
        max_buffer_tokens: usize,
        target_region: RegionType,
        region_ordering: RegionOrdering,
    ) -> Self {
        assert!(max_buffer_tokens > 0, "max_buffer_tokens must be positive");
        assert!(
            target_region.group_policy().is_some(),
            "{} regions are never assembled",
            target_region
        );

        Self {
            max_buffer_tokens,
            target_region,
            region_ordering,
        }
    }
}
