//! Compaction of the per-layer LED color table
//!
//! The Oryx configurator emits one `{h,s,v}` triple for every LED of every
//! layer. This module folds that table into
//!
//! - `led_layer_map`: layer id to table position
//! - `ledmap_distinct_colors`: each lit color once
//! - `ledmap_indirect_<n>`: `(led, color)` pairs for the lit LEDs of a layer,
//!   closed by `{ 255, 255 }`
//!
//! and replaces `set_layer_color()` with a routine that walks those lists.

pub mod compact;
pub mod emit;
pub mod parser;
pub mod routine;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    cursor::LineCursor, error::RewriteError, markers::TABLE_CLOSER, types::Color,
};

pub use compact::{CompactLedmap, SparseEntry};
pub use parser::{parse_record, LayerRecord, RecordError};

/// Reads the color table up to and including its closing line. The cursor
/// must sit right after the opening line.
pub fn read_table(cursor: &mut LineCursor<'_>) -> Result<CompactLedmap, RewriteError> {
    let opened_at = cursor.line();
    let mut records = Vec::new();

    loop {
        let Some(line) = cursor.next() else {
            return Err(RewriteError::UnterminatedBlock {
                block: "led color table",
                line: opened_at,
            });
        };
        if line.starts_with(TABLE_CLOSER) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_record(line).map_err(|source| RewriteError::MalformedRecord {
            line: cursor.line(),
            text: line.to_owned(),
            source,
        })?;
        debug!(
            "Layer {}: {} leds at line {}",
            record.layer_id,
            record.colors.len(),
            cursor.line()
        );
        records.push(record);
    }

    let table = CompactLedmap::build(&records)?;
    info!(
        "{} layers, {} distinct colors, {} lit leds",
        table.layers.len(),
        table.distinct_colors.len(),
        table.sparse_entry_count()
    );
    Ok(table)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedmapSummary {
    pub layers: usize,
    pub led_count: usize,
    pub distinct_colors: Vec<Color>,
    pub sparse_entries: usize,
    pub dense_size: usize,
    pub compact_size: usize,
}

impl From<&CompactLedmap> for LedmapSummary {
    fn from(table: &CompactLedmap) -> Self {
        LedmapSummary {
            layers: table.layers.len(),
            led_count: table.led_count,
            distinct_colors: table.distinct_colors.clone(),
            sparse_entries: table.sparse_entry_count(),
            dense_size: table.dense_size(),
            compact_size: table.compact_size(),
        }
    }
}
