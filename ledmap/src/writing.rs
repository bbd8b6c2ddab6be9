use std::{
    ffi::{OsStr, OsString},
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    cursor::LineCursor,
    error::RewriteError,
    layout::scan_keymaps,
    ledmap::{emit::declarations, read_table, routine::replace_set_layer_color, LedmapSummary},
    markers::{KEYMAPS_OPENER, LAYER_STATE_SIGNATURE, LEDMAP_OPENER, LEGACY_LAYER_STATE_SIGNATURE},
    types::{LayoutReport, RewriteOptions, RewriteReport, Stage},
};

#[derive(Debug)]
pub struct Rewrite {
    pub text: String,
    pub report: RewriteReport,
}

pub fn read_keymap(path: &Path) -> Result<String, RewriteError> {
    fs::read_to_string(path).map_err(|source| RewriteError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Rewrites a whole keymap in one forward pass. Nothing is produced unless
/// every block in the file matched.
///
/// Output of this function no longer contains the color table, so feeding
/// it back in fails with [`RewriteError::MissingColorTable`].
pub fn rewrite_source(
    source: &str,
    options: &RewriteOptions,
    mut report_progress: impl FnMut(Stage),
) -> Result<Rewrite, RewriteError> {
    let mut cursor = LineCursor::new(source);
    let mut out = Vec::new();
    let mut report = RewriteReport::default();

    report_progress(Stage::CopyingLines);
    while let Some(line) = cursor.next() {
        if line.starts_with(LEDMAP_OPENER) {
            debug!("Color table at line {}", cursor.line());
            report_progress(Stage::CompactingLedmap);
            let table = read_table(&mut cursor)?;
            out.extend(declarations(&table));

            report_progress(Stage::ReplacingFunction);
            replace_set_layer_color(&mut cursor, &mut out)?;

            report.ledmap = Some(LedmapSummary::from(&table));
            report_progress(Stage::CopyingLines);
        } else if options.layout_stats && line.starts_with(KEYMAPS_OPENER) {
            debug!("Keymap table at line {}", cursor.line());
            out.push(line.to_owned());
            report_progress(Stage::ScanningLayout);
            let layers = scan_keymaps(&mut cursor, &mut out)?;
            let layout = LayoutReport::from(layers);
            info!(
                "Keymap totals: default {}b, bitcode {}b, sparse {}b",
                layout.totals.default_size, layout.totals.bitcode_size, layout.totals.sparse_size
            );
            report.layout = Some(layout);
            report_progress(Stage::CopyingLines);
        } else if options.legacy_signature_fix && line.contains(LEGACY_LAYER_STATE_SIGNATURE) {
            debug!("Updating layer_state_set_user signature at line {}", cursor.line());
            out.push(line.replace(LEGACY_LAYER_STATE_SIGNATURE, LAYER_STATE_SIGNATURE));
        } else {
            out.push(line.to_owned());
        }
    }

    if report.ledmap.is_none() {
        return Err(RewriteError::MissingColorTable);
    }

    let mut text = out.join("\n");
    text.push('\n');
    Ok(Rewrite { text, report })
}

/// Reads `keymap_in`, rewrites it and stores the result at `keymap_out`
/// (which may be the same path). `keymap_out` is left alone on any error.
pub fn rewrite_file(
    keymap_in: &Path,
    keymap_out: &Path,
    options: &RewriteOptions,
    mut report_progress: impl FnMut(Stage),
) -> Result<RewriteReport, RewriteError> {
    report_progress(Stage::Reading);
    let source = read_keymap(keymap_in)?;

    let Rewrite { text, report } = rewrite_source(&source, options, &mut report_progress)?;

    report_progress(Stage::Writing);
    write_atomically(keymap_out, &text)?;
    info!("Wrote {} ({} bytes)", keymap_out.display(), text.len());

    Ok(report)
}

/// Writes next to `path` first and renames over it, so readers see either
/// the old file or the complete new one.
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), RewriteError> {
    let temporary = temporary_path(path);
    let result = fs::write(&temporary, contents).and_then(|()| fs::rename(&temporary, path));

    if let Err(source) = result {
        // Nothing to do if the temporary file was never created
        let _ = fs::remove_file(&temporary);
        return Err(RewriteError::Write {
            path: path.to_owned(),
            source,
        });
    }
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(OsStr::new("keymap")));
    name.push(".ledmap-tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapacityError;

    const KEYMAP: &str = "\
#include QMK_KEYBOARD_H

const uint8_t PROGMEM ledmap[][DRIVER_LED_TOTAL][3] = {
    [0] = { {0,0,0}, {5,5,5} },

    [3] = { {5,5,5}, {0,0,0} },

};

void set_layer_color(int layer) {
  rgb_matrix_set_color_all( 0, 0, 0 );
}

uint16_t layer_state_set_user(uint16_t state) {
  return state;
}
";

    fn no_progress(_: Stage) {}

    #[test]
    fn rewrites_table_and_function() {
        let rewrite = rewrite_source(KEYMAP, &RewriteOptions::default(), no_progress).unwrap();
        let lines: Vec<&str> = rewrite.text.lines().collect();

        assert_eq!(lines[0], "#include QMK_KEYBOARD_H");
        assert_eq!(lines[2], "const uint8_t PROGMEM led_layer_map[4] = { 0, 0, 0, 1 };");
        assert!(lines.contains(&"const index_color_tuple PROGMEM ledmap_indirect_0[] = { { 1, 0 }, { 255, 255 } };"));
        assert!(lines.contains(&"const index_color_tuple PROGMEM ledmap_indirect_1[] = { { 0, 0 }, { 255, 255 } };"));
        assert!(!lines.iter().any(|line| line.contains("rgb_matrix_set_color_all")));
        assert!(lines.contains(&"layer_state_t layer_state_set_user(layer_state_t state) {"));
        assert!(rewrite.text.ends_with("  return state;\n}\n"));

        let summary = rewrite.report.ledmap.unwrap();
        assert_eq!(summary.layers, 2);
        assert_eq!(summary.sparse_entries, 2);
        assert!(rewrite.report.layout.is_none());
    }

    #[test]
    fn legacy_fix_can_be_disabled() {
        let options = RewriteOptions {
            legacy_signature_fix: false,
            ..Default::default()
        };
        let rewrite = rewrite_source(KEYMAP, &options, no_progress).unwrap();
        assert!(rewrite
            .text
            .contains("uint16_t layer_state_set_user(uint16_t state) {"));
    }

    #[test]
    fn second_pass_fails() {
        let first = rewrite_source(KEYMAP, &RewriteOptions::default(), no_progress).unwrap();
        let err = rewrite_source(&first.text, &RewriteOptions::default(), no_progress).unwrap_err();
        assert!(matches!(err, RewriteError::MissingColorTable));
    }

    #[test]
    fn malformed_record_aborts() {
        let broken = KEYMAP.replace("[3] = { {5,5,5}, {0,0,0} },", "[3] = { {5,5,5}, {0,0,0} ,");
        let err = rewrite_source(&broken, &RewriteOptions::default(), no_progress).unwrap_err();
        assert!(matches!(err, RewriteError::MalformedRecord { line: 6, .. }));
    }

    #[test]
    fn empty_table_still_replaces_function() {
        let empty = KEYMAP
            .replace("    [0] = { {0,0,0}, {5,5,5} },\n\n", "")
            .replace("    [3] = { {5,5,5}, {0,0,0} },\n\n", "");
        let rewrite = rewrite_source(&empty, &RewriteOptions::default(), no_progress).unwrap();

        assert!(rewrite
            .text
            .contains("const uint8_t PROGMEM led_layer_map[0] = {  };"));
        assert!(!rewrite.text.contains("ledmap_indirect_0"));
        assert!(!rewrite.text.contains("rgb_matrix_set_color_all"));
        assert!(rewrite.text.contains("void set_layer_color(int layer) {"));

        let summary = rewrite.report.ledmap.unwrap();
        assert_eq!(summary.layers, 0);
        assert_eq!(summary.sparse_entries, 0);
    }

    #[test]
    fn too_many_layers_aborts() {
        let records = "    [0] = { {1,1,1} },\n".repeat(256);
        let crowded = KEYMAP.replace("    [0] = { {0,0,0}, {5,5,5} },\n", &records);
        let err = rewrite_source(&crowded, &RewriteOptions::default(), no_progress).unwrap_err();
        assert!(matches!(
            err,
            RewriteError::Capacity(CapacityError::LayerCount { count: 257 })
        ));
    }

    #[test]
    fn reports_stages_in_order() {
        let mut stages = Vec::new();
        rewrite_source(KEYMAP, &RewriteOptions::default(), |stage| stages.push(stage)).unwrap();
        assert_eq!(
            stages,
            vec![
                Stage::CopyingLines,
                Stage::CompactingLedmap,
                Stage::ReplacingFunction,
                Stage::CopyingLines,
            ]
        );
    }

    #[test]
    fn temporary_file_sits_next_to_target() {
        assert_eq!(
            temporary_path(Path::new("/tmp/keymaps/keymap.c")),
            PathBuf::from("/tmp/keymaps/.keymap.c.ledmap-tmp")
        );
    }
}
