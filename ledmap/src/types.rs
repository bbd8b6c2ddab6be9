use std::fmt;

use serde::Serialize;

use crate::layout::{LayerStats, LayoutTotals};
use crate::ledmap::LedmapSummary;

/// Three bytes exactly as written in the color table. Oryx exports store
/// them as QMK HSV, and the generated routine reads them that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const OFF: Color = Color(0, 0, 0);

    pub fn is_off(&self) -> bool {
        *self == Color::OFF
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Scan the keymap table and report encoding size estimates
    pub layout_stats: bool,
    /// Rewrite the uint16_t `layer_state_set_user` signature to `layer_state_t`
    pub legacy_signature_fix: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            layout_stats: false,
            legacy_signature_fix: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    CopyingLines,
    ScanningLayout,
    CompactingLedmap,
    ReplacingFunction,
    Writing,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Reading => "Reading Keymap",
            Stage::CopyingLines => "Copying Lines",
            Stage::ScanningLayout => "Scanning Layout",
            Stage::CompactingLedmap => "Compacting LED Colors",
            Stage::ReplacingFunction => "Replacing set_layer_color",
            Stage::Writing => "Writing Keymap",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteReport {
    pub layout: Option<LayoutReport>,
    pub ledmap: Option<LedmapSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub layers: Vec<LayerStats>,
    pub totals: LayoutTotals,
}

impl From<Vec<LayerStats>> for LayoutReport {
    fn from(layers: Vec<LayerStats>) -> Self {
        let totals = layers.iter().collect();
        LayoutReport { layers, totals }
    }
}
