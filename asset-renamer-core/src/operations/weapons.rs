use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::ensure_root;
use crate::apply::{apply_plan, ApplyOptions};
use crate::collision::validate_plan;
use crate::error::RenameError;
use crate::fs::{AssetFs, EntryKind};
use crate::output::{RunResult, Tool};
use crate::plan::{build_plan, RenamePlan};
use crate::rules::WeaponFrameRule;

/// Rename weapon frames in every weapon directory directly under `root`.
///
/// Plans for all weapon directories are built and validated before the first
/// rename, so a problem in any directory leaves the whole tree untouched.
pub fn weapons_operation<F, W>(
    fs: &F,
    root: &Path,
    options: &ApplyOptions,
    out: &mut W,
) -> Result<RunResult>
where
    F: AssetFs + ?Sized,
    W: Write + ?Sized,
{
    ensure_root(fs, root)?;

    let weapon_dirs = weapon_dirs(fs, root)?;
    let mut plans: Vec<RenamePlan> = Vec::with_capacity(weapon_dirs.len());
    for dir in &weapon_dirs {
        let plan = build_plan(fs, dir, &WeaponFrameRule)?;
        validate_plan(fs, &plan)?;
        plans.push(plan);
    }

    let mut renames = Vec::new();
    for plan in &plans {
        let applied = apply_plan(fs, plan, options, out)?;
        renames.extend(applied.renames);
    }

    Ok(RunResult {
        tool: Tool::Weapons,
        root: root.to_path_buf(),
        dry_run: options.dry_run,
        directories_scanned: weapon_dirs.len(),
        renames,
    })
}

/// Subdirectories of `root` in name order, including symlinks to directories.
fn weapon_dirs<F: AssetFs + ?Sized>(fs: &F, root: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs
        .list_dir(root)
        .map_err(|e| RenameError::io(format!("Failed to read directory {}", root.display()), e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let is_dir = match entry.kind {
            EntryKind::Dir => true,
            EntryKind::Symlink => fs.is_dir(&entry.path).map_err(|e| {
                RenameError::io(format!("Failed to inspect {}", entry.path.display()), e)
            })?,
            EntryKind::File | EntryKind::Other => false,
        };
        if is_dir {
            dirs.push(entry.path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
