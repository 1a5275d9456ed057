//! High-level operations that correspond to CLI commands
//!
//! These modules contain the core business logic for each tool, separated
//! from CLI concerns like argument parsing and output formatting.

pub mod midi;
pub mod weapons;

pub use midi::midi_operation;
pub use weapons::weapons_operation;

use std::path::Path;

use crate::error::{RenameError, RenameResult};
use crate::fs::{AssetFs, EntryKind};

/// Fail early unless `root` is an existing directory.
///
/// A symlinked root is accepted; listing it will fail later if it does not
/// point at a directory.
pub(crate) fn ensure_root<F: AssetFs + ?Sized>(fs: &F, root: &Path) -> RenameResult<()> {
    let kind = fs
        .kind(root)
        .map_err(|e| RenameError::io(format!("Failed to inspect {}", root.display()), e))?;
    match kind {
        None => Err(RenameError::PathNotFound(root.to_path_buf())),
        Some(EntryKind::Dir | EntryKind::Symlink) => Ok(()),
        Some(_) => Err(RenameError::NotADirectory(root.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    #[test]
    fn test_ensure_root() {
        let fs = MemoryFs::new();
        fs.add_file("assets/readme.txt");

        ensure_root(&fs, Path::new("assets")).unwrap();
        assert!(matches!(
            ensure_root(&fs, Path::new("missing")),
            Err(RenameError::PathNotFound(_))
        ));
        assert!(matches!(
            ensure_root(&fs, Path::new("assets/readme.txt")),
            Err(RenameError::NotADirectory(_))
        ));
    }
}
