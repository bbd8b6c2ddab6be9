use std::collections::HashSet;

use serde::Serialize;

use crate::markers::{SPARSE_BITMAP_BITS, TRANSPARENT_KEY};

/// Bytes one layer would take under each candidate keymap encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerStats {
    pub keys: usize,
    pub distinct_keys: usize,
    pub non_transparent_keys: usize,
    /// Plain `uint16_t` per key
    pub default_size: usize,
    /// `uint16_t` per distinct key
    pub dictionary_size: usize,
    /// Packed dictionary indices
    pub bitcode_size: usize,
    /// Presence bitmap plus `uint16_t` per non-transparent key
    pub sparse_size: usize,
}

impl LayerStats {
    pub fn from_keys(keys: &[String]) -> Self {
        let distinct_keys = keys.iter().collect::<HashSet<_>>().len();
        let non_transparent_keys = keys.iter().filter(|key| *key != TRANSPARENT_KEY).count();
        let bits = bits_per_key(distinct_keys);

        LayerStats {
            keys: keys.len(),
            distinct_keys,
            non_transparent_keys,
            default_size: 2 * keys.len(),
            dictionary_size: 2 * distinct_keys,
            bitcode_size: (bits * keys.len()).div_ceil(8),
            sparse_size: SPARSE_BITMAP_BITS.div_ceil(8) + 2 * non_transparent_keys,
        }
    }

    /// Dictionary plus packed indices
    pub fn bitcode_total(&self) -> usize {
        self.dictionary_size + self.bitcode_size
    }
}

/// `ceil(log2(distinct))`, but never below one bit so that a layer made of a
/// single keycode still costs something per key.
pub fn bits_per_key(distinct: usize) -> usize {
    if distinct <= 1 {
        1
    } else {
        (usize::BITS - (distinct - 1).leading_zeros()) as usize
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutTotals {
    pub default_size: usize,
    pub bitcode_size: usize,
    pub sparse_size: usize,
}

impl<'a> FromIterator<&'a LayerStats> for LayoutTotals {
    fn from_iter<I: IntoIterator<Item = &'a LayerStats>>(iter: I) -> Self {
        iter.into_iter()
            .fold(LayoutTotals::default(), |mut totals, layer| {
                totals.default_size += layer.default_size;
                totals.bitcode_size += layer.bitcode_total();
                totals.sparse_size += layer.sparse_size;
                totals
            })
    }
}
