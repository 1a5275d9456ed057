use anyhow::Result;
use std::io::Write;
use std::path::Path;

use super::ensure_root;
use crate::apply::{apply_plan, ApplyOptions};
use crate::collision::validate_plan;
use crate::error::RenameError;
use crate::fs::AssetFs;
use crate::output::{RunResult, Tool};
use crate::plan::build_plan;
use crate::rules::MidiNameRule;

/// Normalize the names of the MIDI files directly inside `root`.
pub fn midi_operation<F, W>(
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

    let plan = build_plan(fs, root, &MidiNameRule)?;
    validate_plan(fs, &plan)?;

    let renames = if plan.is_empty() {
        writeln!(out, "Nothing to rename.")
            .map_err(|e| RenameError::io("Failed to write output", e))?;
        Vec::new()
    } else {
        apply_plan(fs, &plan, options, out)?.renames
    };

    Ok(RunResult {
        tool: Tool::Midi,
        root: root.to_path_buf(),
        dry_run: options.dry_run,
        directories_scanned: 1,
        renames,
    })
}
