//! Visual hints for nodes and edges

use serde::Serialize;
use std::collections::HashMap;

/// Fallback fill for domains outside the palette
pub const FALLBACK_COLOR: &str = "#999999";

/// Border of concepts that have at least one linked activity
pub const ACTIVITY_BORDER_COLOR: &str = "#111827";

/// Domain → strand edge color
pub const DOMAIN_EDGE_COLOR: &str = "#cccccc";

/// Strand → concept edge color
pub const STRAND_EDGE_COLOR: &str = "#dddddd";

/// Concept ↔ concept edge color
pub const LATERAL_EDGE_COLOR: &str = "#ff9999";

/// Node shape understood by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Rectangle with the label inside
    Box,
    /// Ellipse with the label inside
    Ellipse,
    /// Filled circle with the label below
    Dot,
}

/// Label font
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Font {
    /// Point size
    pub size: u32,
    /// Bold weight
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
}

/// Per-tier size and font settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStyle {
    /// Node shape
    pub shape: Shape,
    /// Node size
    pub size: u32,
    /// Label font size
    pub font_size: u32,
    /// Bold label
    pub bold: bool,
}

/// Domain nodes: large bold boxes
pub const DOMAIN_STYLE: TierStyle = TierStyle {
    shape: Shape::Box,
    size: 45,
    font_size: 18,
    bold: true,
};

/// Strand nodes: medium ellipses
pub const STRAND_STYLE: TierStyle = TierStyle {
    shape: Shape::Ellipse,
    size: 28,
    font_size: 14,
    bold: false,
};

/// Concept nodes: small dots
pub const CONCEPT_STYLE: TierStyle = TierStyle {
    shape: Shape::Dot,
    size: 18,
    font_size: 12,
    bold: false,
};

impl TierStyle {
    /// Font for this tier
    pub fn font(&self) -> Font {
        Font {
            size: self.font_size,
            bold: self.bold,
        }
    }
}

/// Fill colors keyed by domain name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPalette {
    colors: HashMap<String, String>,
    fallback: String,
}

impl DomainPalette {
    /// Palette with no domain entries
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
            fallback: FALLBACK_COLOR.to_string(),
        }
    }

    /// Set the color for a domain
    pub fn with_color(mut self, domain: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(domain.into(), color.into());
        self
    }

    /// Color for `domain`, or the fallback
    pub fn color_for(&self, domain: &str) -> &str {
        self.colors
            .get(domain)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for DomainPalette {
    /// The five science domains of the bundled knowledge bases
    fn default() -> Self {
        Self::empty()
            .with_color("Physics (The Physical World)", "#1f77b4")
            .with_color("Chemistry (The World of Matter)", "#2ca02c")
            .with_color("Biology (The Living World)", "#ff7f0e")
            .with_color("Earth & Space Science", "#9467bd")
            .with_color("Scientific Inquiry & Investigative Process", "#7f7f7f")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_fallback() {
        let palette = DomainPalette::default();
        assert_eq!(palette.color_for("Biology (The Living World)"), "#ff7f0e");
        assert_eq!(palette.color_for("Music"), FALLBACK_COLOR);
    }

    #[test]
    fn test_font_serialization_omits_regular_weight() {
        let json = serde_json::to_value(CONCEPT_STYLE.font()).unwrap();
        assert_eq!(json, serde_json::json!({"size": 12}));
        let json = serde_json::to_value(DOMAIN_STYLE.font()).unwrap();
        assert_eq!(json, serde_json::json!({"size": 18, "bold": true}));
    }
}
