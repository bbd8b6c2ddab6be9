//! Keymap size diagnostics. The keymap table is copied through untouched;
//! each `LAYOUT_ergodox_pretty(...)` invocation is tokenized and measured.

pub mod stats;
pub mod tokenizer;

use tracing::info;

use crate::{
    cursor::LineCursor,
    error::RewriteError,
    markers::{LAYER_CLOSER, LAYOUT_MACRO, TABLE_CLOSER},
};

pub use stats::{bits_per_key, LayerStats, LayoutTotals};
pub use tokenizer::tokenize;

/// Consumes the keymap table up to and including its closing line, copying
/// every line to `out`.
pub fn scan_keymaps(
    cursor: &mut LineCursor<'_>,
    out: &mut Vec<String>,
) -> Result<Vec<LayerStats>, RewriteError> {
    let opened_at = cursor.line();
    let mut layers = Vec::new();

    loop {
        let line = cursor.next().ok_or(RewriteError::UnterminatedBlock {
            block: "keymap table",
            line: opened_at,
        })?;
        out.push(line.to_owned());
        if line.starts_with(TABLE_CLOSER) {
            break;
        }
        if !line.contains(LAYOUT_MACRO) {
            continue;
        }

        let layer_at = cursor.line();
        let mut keys = Vec::new();
        loop {
            let line = cursor.next().ok_or(RewriteError::UnterminatedBlock {
                block: LAYOUT_MACRO,
                line: layer_at,
            })?;
            out.push(line.to_owned());
            if line.starts_with(LAYER_CLOSER) {
                break;
            }
            keys.extend(tokenize(line));
        }

        let stats = LayerStats::from_keys(&keys);
        info!(
            "Layer {}: {} keys, {} distinct; default {}b, bitcode {}b (dict {}b), sparse {}b",
            layers.len(),
            stats.keys,
            stats.distinct_keys,
            stats.default_size,
            stats.bitcode_total(),
            stats.dictionary_size,
            stats.sparse_size
        );
        layers.push(stats);
    }

    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYMAPS: &str = "\
  [0] = LAYOUT_ergodox_pretty(
    KC_A, KC_B, LT(1,KC_C),
    KC_A, KC_TRANSPARENT
  ),
  [1] = LAYOUT_ergodox_pretty(
    KC_TRANSPARENT, KC_TRANSPARENT, KC_TRANSPARENT
  )
};
after";

    #[test]
    fn measures_each_layer_and_copies_lines() {
        let mut cursor = LineCursor::new(KEYMAPS);
        let mut out = Vec::new();
        let layers = scan_keymaps(&mut cursor, &mut out).unwrap();

        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].keys, 5);
        assert_eq!(layers[0].distinct_keys, 4);
        assert_eq!(layers[1].keys, 3);
        assert_eq!(layers[1].non_transparent_keys, 0);

        let copied: Vec<&str> = KEYMAPS.lines().take(8).collect();
        assert_eq!(out, copied);
        assert_eq!(cursor.next(), Some("after"));
    }

    #[test]
    fn unterminated_layer() {
        let mut cursor = LineCursor::new("  [0] = LAYOUT_ergodox_pretty(\n    KC_A,\n");
        let err = scan_keymaps(&mut cursor, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            RewriteError::UnterminatedBlock {
                block: LAYOUT_MACRO,
                line: 1
            }
        ));
    }
}
