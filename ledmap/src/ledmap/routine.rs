use crate::{
    cursor::LineCursor,
    error::RewriteError,
    markers::{FUNCTION_CLOSER, SET_LAYER_COLOR_SIGNATURE},
};

/// Walks `ledmap_indirect_sparse[led_layer_map[layer]]` until the `{ 255, 255 }`
/// marker, lighting listed LEDs and clearing every LED in between and after.
const SET_LAYER_COLOR: &str = r#"void set_layer_color(int layer) {
  uint8_t layer_index = pgm_read_byte(&led_layer_map[layer]);
  const index_color_tuple *ledmap = pgm_read_ptr(&ledmap_indirect_sparse[layer_index]);

  int i = 0;
  int next_i = 0;
  do {
    next_i = pgm_read_byte(&ledmap->index);
    if (next_i == 255) {
      next_i = DRIVER_LED_TOTAL;
    } else {
      uint8_t distinct_color_index = pgm_read_byte(&ledmap->distinct_color);
      HSV hsv = {
        .h = pgm_read_byte(&ledmap_distinct_colors[distinct_color_index][0]),
        .s = pgm_read_byte(&ledmap_distinct_colors[distinct_color_index][1]),
        .v = pgm_read_byte(&ledmap_distinct_colors[distinct_color_index][2]),
      };
      RGB rgb = hsv_to_rgb( hsv );
      float f = (float)rgb_matrix_config.hsv.v / UINT8_MAX;
      rgb_matrix_set_color( next_i, f * rgb.r, f * rgb.g, f * rgb.b );
    }
    for (int j = i; j < next_i; ++j) {
      rgb_matrix_set_color( j, 0, 0, 0 );
    }
    i = next_i + 1;
    ++ledmap;
  } while (next_i != DRIVER_LED_TOTAL);
}"#;

/// Swaps the old `set_layer_color()` for [`SET_LAYER_COLOR`].
///
/// The cursor must sit on the color table closer. What follows has to be a
/// single blank line and then the routine's signature; the old body is
/// dropped up to the first line starting with `}`.
pub fn replace_set_layer_color(
    cursor: &mut LineCursor<'_>,
    out: &mut Vec<String>,
) -> Result<(), RewriteError> {
    match cursor.next() {
        Some(line) if line.trim().is_empty() => {}
        found => {
            return Err(RewriteError::ExpectedBlankLine {
                line: cursor.line() + usize::from(found.is_none()),
                found: found.unwrap_or_default().to_owned(),
            })
        }
    }

    match cursor.next() {
        Some(line) if line.starts_with(SET_LAYER_COLOR_SIGNATURE) => {}
        found => {
            return Err(RewriteError::UnexpectedSignature {
                line: cursor.line() + usize::from(found.is_none()),
                expected: SET_LAYER_COLOR_SIGNATURE,
                found: found.unwrap_or_default().to_owned(),
            })
        }
    }

    let signature_at = cursor.line();
    if !cursor.any(|line| line.starts_with(FUNCTION_CLOSER)) {
        return Err(RewriteError::UnterminatedFunction {
            signature: SET_LAYER_COLOR_SIGNATURE,
            line: signature_at,
        });
    }

    out.extend(SET_LAYER_COLOR.lines().map(str::to_owned));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD_FUNCTION: &str = "
void set_layer_color(int layer) {
  for (int i = 0; i < DRIVER_LED_TOTAL; i++) {
    rgb_matrix_set_color( i, 0, 0, 0 );
  }
}
after";

    #[test]
    fn replaces_body() {
        let mut cursor = LineCursor::new(OLD_FUNCTION);
        let mut out = Vec::new();
        replace_set_layer_color(&mut cursor, &mut out).unwrap();

        assert_eq!(out.first().map(String::as_str), Some("void set_layer_color(int layer) {"));
        assert_eq!(out.last().map(String::as_str), Some("}"));
        assert!(out.iter().any(|line| line.contains("ledmap_indirect_sparse[layer_index]")));
        assert_eq!(cursor.next(), Some("after"));
    }

    #[test]
    fn requires_blank_line() {
        let mut cursor = LineCursor::new("void set_layer_color(int layer) {\n}\n");
        let err = replace_set_layer_color(&mut cursor, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RewriteError::ExpectedBlankLine { line: 1, .. }));
    }

    #[test]
    fn requires_signature() {
        let mut cursor = LineCursor::new("\nvoid set_layer_colour(int layer) {\n}\n");
        let err = replace_set_layer_color(&mut cursor, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RewriteError::UnexpectedSignature { line: 2, .. }));

        let mut cursor = LineCursor::new("\n");
        let err = replace_set_layer_color(&mut cursor, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            RewriteError::UnexpectedSignature { line: 2, ref found, .. } if found.is_empty()
        ));
    }

    #[test]
    fn requires_closing_brace() {
        let mut cursor = LineCursor::new("\nvoid set_layer_color(int layer) {\n  return;\n");
        let err = replace_set_layer_color(&mut cursor, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RewriteError::UnterminatedFunction { line: 2, .. }));
    }
}
