//! Naming rules: map a source file name to its canonical destination name.
//!
//! A rule never touches the filesystem. Anything it declines to map is left
//! alone by the plan builder.

pub mod midi;
pub mod weapon;

pub use midi::{normalize_stem, MidiNameRule};
pub use weapon::{frame_name, WeaponFrameRule};

use std::path::Path;

pub trait NamingRule {
    /// Scratch state for one plan build, created fresh each time.
    type State: Default;

    /// Whether a file with this name is considered at all.
    fn is_eligible(&self, file_name: &str) -> bool;

    /// Destination file name for `stem`, or `None` to leave the file alone.
    ///
    /// Called once per eligible file in scan order.
    fn destination(&self, stem: &str, state: &mut Self::State) -> Option<String>;
}

/// Case-insensitive extension check; `ext` is given without the dot.
pub fn has_extension(file_name: &str, ext: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
