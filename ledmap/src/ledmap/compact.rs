use std::collections::HashMap;

use tracing::warn;

use crate::{error::CapacityError, ledmap::parser::LayerRecord, types::Color};

/// Largest value any one-byte index may take; 255 is the end marker.
pub const MAX_INDEX: usize = 254;

/// Pointer width on the ErgoDox EZ (ATmega32U4)
const POINTER_BYTES: usize = 2;

/// One lit LED of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparseEntry {
    pub led: u8,
    pub color: u8,
}

impl SparseEntry {
    pub const SENTINEL: SparseEntry = SparseEntry {
        led: 255,
        color: 255,
    };

    pub fn is_sentinel(&self) -> bool {
        *self == SparseEntry::SENTINEL
    }
}

/// Color table with duplicate colors folded into one dictionary and unlit
/// LEDs left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactLedmap {
    /// Indexed by layer id, gives the position of that layer in `layers`
    pub layer_map: Vec<u8>,
    /// Every lit color, numbered in order of first appearance
    pub distinct_colors: Vec<Color>,
    /// Per layer in source order, each list ends with [`SparseEntry::SENTINEL`]
    pub layers: Vec<Vec<SparseEntry>>,
    /// Longest layer in the source table
    pub led_count: usize,
}

impl CompactLedmap {
    pub fn build(records: &[LayerRecord]) -> Result<Self, CapacityError> {
        if records.len() > MAX_INDEX + 1 {
            return Err(CapacityError::LayerCount {
                count: records.len(),
            });
        }
        if let Some(record) = records.iter().find(|record| record.layer_id > MAX_INDEX) {
            return Err(CapacityError::LayerId {
                id: record.layer_id,
            });
        }

        let layer_map = build_layer_map(records);

        let mut color_index = HashMap::new();
        let mut distinct_colors = Vec::new();
        for color in records.iter().flat_map(|record| &record.colors) {
            if color.is_off() || color_index.contains_key(color) {
                continue;
            }
            color_index.insert(*color, distinct_colors.len());
            distinct_colors.push(*color);
        }
        if distinct_colors.len() > MAX_INDEX {
            return Err(CapacityError::DistinctColors {
                count: distinct_colors.len(),
            });
        }

        let mut layers = Vec::with_capacity(records.len());
        for record in records {
            let mut entries = Vec::new();
            for (led, color) in record.colors.iter().enumerate() {
                if color.is_off() {
                    continue;
                }
                if led > MAX_INDEX {
                    return Err(CapacityError::LedIndex {
                        layer: record.layer_id,
                        index: led,
                    });
                }
                entries.push(SparseEntry {
                    led: led as u8,
                    color: color_index[color] as u8,
                });
            }
            entries.push(SparseEntry::SENTINEL);
            layers.push(entries);
        }

        let led_count = records
            .iter()
            .map(|record| record.colors.len())
            .max()
            .unwrap_or(0);

        Ok(CompactLedmap {
            layer_map,
            distinct_colors,
            layers,
            led_count,
        })
    }

    /// Lit LEDs across all layers, sentinels excluded
    pub fn sparse_entry_count(&self) -> usize {
        self.layers
            .iter()
            .flatten()
            .filter(|entry| !entry.is_sentinel())
            .count()
    }

    /// Flash taken by the dense `ledmap[][DRIVER_LED_TOTAL][3]` table
    pub fn dense_size(&self) -> usize {
        self.layers.len() * self.led_count * 3
    }

    /// Flash taken by the generated tables
    pub fn compact_size(&self) -> usize {
        let entries: usize = self.layers.iter().map(Vec::len).sum();
        self.layer_map.len()
            + self.distinct_colors.len() * 3
            + entries * 2
            + self.layers.len() * POINTER_BYTES
    }
}

fn build_layer_map(records: &[LayerRecord]) -> Vec<u8> {
    let Some(max_id) = records.iter().map(|record| record.layer_id).max() else {
        return Vec::new();
    };

    let mut layer_map = vec![0; max_id + 1];
    let mut seen = vec![false; max_id + 1];
    for (position, record) in records.iter().enumerate() {
        if seen[record.layer_id] {
            warn!(
                "Layer id {} appears more than once, using the later record",
                record.layer_id
            );
        }
        seen[record.layer_id] = true;
        layer_map[record.layer_id] = position as u8;
    }
    layer_map
}
