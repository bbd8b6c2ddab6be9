// Literal lines the rewriter keys on. The keymap file is generated, so these
// are matched textually and never parsed as C.

/// Opening line of the per-layer LED color table (prefix match)
pub const LEDMAP_OPENER: &str = "const uint8_t PROGMEM ledmap[][DRIVER_LED_TOTAL][3]";

/// Opening line of the keymap table (prefix match)
pub const KEYMAPS_OPENER: &str = "const uint16_t PROGMEM keymaps[][MATRIX_ROWS][MATRIX_COLS] = {";

/// Layout macro invocation that starts one layer inside the keymap table
pub const LAYOUT_MACRO: &str = "LAYOUT_ergodox_pretty";

/// Closes a single layout macro invocation, with or without a trailing comma
pub const LAYER_CLOSER: &str = "  )";

/// Closes both the keymap table and the color table
pub const TABLE_CLOSER: &str = "};";

/// Closes a function body at column 0
pub const FUNCTION_CLOSER: &str = "}";

/// Routine whose body gets replaced after the color table
pub const SET_LAYER_COLOR_SIGNATURE: &str = "void set_layer_color(int layer)";

// Older QMK releases passed the layer state as uint16_t
pub const LEGACY_LAYER_STATE_SIGNATURE: &str = "uint16_t layer_state_set_user(uint16_t state)";
pub const LAYER_STATE_SIGNATURE: &str = "layer_state_t layer_state_set_user(layer_state_t state)";

/// Keycode that falls through to the layer below
pub const TRANSPARENT_KEY: &str = "KC_TRANSPARENT";

/// Width of the presence bitmap in the sparse keymap estimate
pub const SPARSE_BITMAP_BITS: usize = 75;
