//! Shrinks the LED color table of an Oryx-generated ErgoDox EZ `keymap.c`.
//!
//! The dense `ledmap[][DRIVER_LED_TOTAL][3]` table is replaced with a
//! dictionary of distinct colors plus one sparse `(led, color)` list per
//! layer, and `set_layer_color()` is rewritten to read the new tables.
//! Everything else in the file is copied through line by line.
//!
//! This is a one-shot transformation: the rewritten file no longer has the
//! markers the rewriter looks for, and running it again fails.
//!
//! ```no_run
//! use std::path::Path;
//! use ledmap::{rewrite_file, RewriteOptions};
//!
//! let keymap = Path::new("keyboards/ergodox_ez/keymaps/colemak/keymap.c");
//! let report = rewrite_file(keymap, keymap, &RewriteOptions::default(), |_| {})?;
//! # Ok::<(), ledmap::RewriteError>(())
//! ```

pub mod cursor;
pub mod error;
pub mod layout;
pub mod ledmap;
pub mod markers;
pub mod preview;
pub mod types;
pub mod writing;

pub use error::{CapacityError, RewriteError};
pub use types::{Color, LayoutReport, RewriteOptions, RewriteReport, Stage};
pub use writing::{read_keymap, rewrite_file, rewrite_source, write_atomically, Rewrite};
