//! Detection regions and assembled region groups.

use serde::{Deserialize, Serialize};

use super::kind::RegionType;
use crate::utils::{HasBBox, Rect};

/// A box proposed by the upstream layout detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionRegion {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub page_num: u32,
}

impl DetectionRegion {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, page_num: u32) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
            page_num,
        }
    }
}

impl HasBBox for DetectionRegion {
    fn rect(&self) -> Rect {
        Rect::new(self.xmin, self.ymin, self.xmax, self.ymax)
    }
    fn page(&self) -> u32 {
        self.page_num
    }
}

/// Sentences sharing (section, paragraph, region type), folded into one
/// record with one detection box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionGroupRecord {
    pub document_id: u64,
    pub section_id: u64,
    pub paragraph_id: u64,
    pub region_type: RegionType,
    pub concatenated_text: String,
    /// `None` when nothing was extracted, never an empty list.
    pub symbols: Option<Vec<String>>,
    #[serde(rename = "box")]
    pub bbox: Rect,
    pub page: u32,
}

impl HasBBox for RegionGroupRecord {
    fn rect(&self) -> Rect {
        self.bbox
    }
    fn page(&self) -> u32 {
        self.page
    }
}
