//! Region type tags.
//!
//! The sentence store and the OCR layer both label content with the class
//! names of the layout detector ("Equation", "Body Text", ...). They are parsed
//! once into [`RegionType`] so the rest of the crate can match on variants.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Layout class of a sentence or word box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionType {
    Equation,
    Figure,
    Table,
    FigureCaption,
    TableCaption,
    SectionHeader,
    #[default]
    BodyText,
    Other(SmolStr),
}

/// How sentences of one region type are folded into region groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPolicy {
    /// Inserted between consecutive sentence texts of a group.
    pub separator: &'static str,
    /// Whether the group text is run through the symbol extractor.
    pub extract_symbols: bool,
}

impl RegionType {
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Equation" => RegionType::Equation,
            "Figure" => RegionType::Figure,
            "Table" => RegionType::Table,
            "Figure Caption" => RegionType::FigureCaption,
            "Table Caption" => RegionType::TableCaption,
            "Section Header" => RegionType::SectionHeader,
            "Body Text" => RegionType::BodyText,
            other => RegionType::Other(SmolStr::new(other)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RegionType::Equation => "Equation",
            RegionType::Figure => "Figure",
            RegionType::Table => "Table",
            RegionType::FigureCaption => "Figure Caption",
            RegionType::TableCaption => "Table Caption",
            RegionType::SectionHeader => "Section Header",
            RegionType::BodyText => "Body Text",
            RegionType::Other(name) => name.as_str(),
        }
    }

    #[inline]
    pub fn is_equation(&self) -> bool {
        matches!(self, RegionType::Equation)
    }

    /// Grouping policy, or `None` for types that are never assembled into
    /// region groups.
    pub fn group_policy(&self) -> Option<GroupPolicy> {
        match self {
            // Multi-line equations already carry their own spacing.
            RegionType::Equation => Some(GroupPolicy {
                separator: "",
                extract_symbols: true,
            }),
            RegionType::Figure | RegionType::Table => Some(GroupPolicy {
                separator: " ",
                extract_symbols: false,
            }),
            _ => None,
        }
    }
}

impl From<String> for RegionType {
    fn from(s: String) -> Self {
        RegionType::from_name(&s)
    }
}

impl From<&str> for RegionType {
    fn from(s: &str) -> Self {
        RegionType::from_name(s)
    }
}

impl From<RegionType> for String {
    fn from(t: RegionType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for RegionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
