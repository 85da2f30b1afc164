//! OCR word boxes.

use serde::{Deserialize, Serialize};

use super::kind::RegionType;
use crate::utils::{HasBBox, Rect};

/// Vertical extent of the OCR line a word sits on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSpan {
    pub ymin: f64,
    pub ymax: f64,
}

/// One OCR-recognized word and where it sits on the page.
///
/// Word boxes are consumed strictly in stream order, each exactly once.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawWord")]
pub struct WordBoxRecord {
    pub text: String,
    pub word_box: Rect,
    pub line: LineSpan,
    pub page: u32,
    /// Rendered symbolic (LaTeX) form, when the OCR layer produced one.
    pub symbolic_form: Option<String>,
    pub region_type: RegionType,
}

impl WordBoxRecord {
    /// A body-text word whose line span equals its own box.
    pub fn new(text: impl Into<String>, word_box: Rect, page: u32) -> Self {
        Self {
            text: text.into(),
            word_box,
            line: LineSpan {
                ymin: word_box.ymin,
                ymax: word_box.ymax,
            },
            page,
            symbolic_form: None,
            region_type: RegionType::BodyText,
        }
    }

    pub fn with_line(mut self, line: LineSpan) -> Self {
        self.line = line;
        self
    }

    pub fn with_symbolic_form(mut self, form: impl Into<String>) -> Self {
        self.symbolic_form = Some(form.into());
        self
    }

    pub fn with_region_type(mut self, region_type: RegionType) -> Self {
        self.region_type = region_type;
        self
    }
}

impl HasBBox for WordBoxRecord {
    fn rect(&self) -> Rect {
        self.word_box
    }
    fn page(&self) -> u32 {
        self.page
    }
}

// On-disk layout written by the OCR stage.

#[derive(Deserialize)]
struct RawWordBox {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    page_num: u32,
}

#[derive(Deserialize)]
struct RawWord {
    text: String,
    word_bbox: RawWordBox,
    line_bbox: LineSpan,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    latex: Option<String>,
}

impl From<RawWord> for WordBoxRecord {
    fn from(raw: RawWord) -> Self {
        let b = raw.word_bbox;
        Self {
            text: raw.text,
            word_box: Rect::new(b.xmin, b.ymin, b.xmax, b.ymax),
            line: raw.line_bbox,
            page: b.page_num,
            symbolic_form: raw.latex,
            region_type: raw.kind.map(RegionType::from).unwrap_or_default(),
        }
    }
}
