use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{RenameError, RenameResult};
use crate::fs::AssetFs;
use crate::plan::{RenamePair, RenamePlan};

/// Options for applying a rename plan
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Report the renames without performing them
    pub dry_run: bool,
    /// Append a timestamped record of every step to this file
    pub log_file: Option<PathBuf>,
}

/// Outcome of applying one plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub dry_run: bool,
    pub renames: Vec<RenamePair>,
}

/// Timestamped apply log; a no-op when no log file is configured.
struct ApplyLog {
    file: Option<File>,
}

impl ApplyLog {
    fn open(path: Option<&Path>) -> RenameResult<Self> {
        let file = if let Some(path) = path {
            let open = || -> std::io::Result<File> {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                OpenOptions::new().create(true).append(true).open(path)
            };
            Some(open().map_err(|e| {
                RenameError::io(format!("Failed to open log file {}", path.display()), e)
            })?)
        } else {
            None
        };

        Ok(Self { file })
    }

    fn log(&mut self, message: &str) -> RenameResult<()> {
        if let Some(ref mut file) = self.file {
            writeln!(
                file,
                "[{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                message
            )
            .and_then(|()| file.flush())
            .map_err(|e| RenameError::io("Failed to write apply log", e))?;
        }
        Ok(())
    }
}

/// Execute a validated plan.
///
/// Every source is first moved to its temporary name, then every temporary
/// name is moved to its destination, so a destination that is also another
/// pair's source is never clobbered. Each rename is written to `out` as
/// `RENAMED: <a> -> <b>`. In dry-run mode nothing is touched and each pair is
/// written once as `DRYRUN: <src> -> <dst>`.
///
/// A failure in either phase stops immediately; renames already done are
/// left as they are.
pub fn apply_plan<F, W>(
    fs: &F,
    plan: &RenamePlan,
    options: &ApplyOptions,
    out: &mut W,
) -> RenameResult<ApplyResult>
where
    F: AssetFs + ?Sized,
    W: Write + ?Sized,
{
    let result = ApplyResult {
        dry_run: options.dry_run,
        renames: plan.renames.clone(),
    };

    if plan.is_empty() {
        return Ok(result);
    }

    if options.dry_run {
        for pair in plan {
            report(out, "DRYRUN", &pair.from, &pair.to)?;
        }
        return Ok(result);
    }

    let mut log = ApplyLog::open(options.log_file.as_deref())?;
    let staged: Vec<(&RenamePair, PathBuf)> = plan.iter().map(|p| (p, p.temp_path())).collect();

    log.log(&format!("Phase 1: parking {} files", staged.len()))?;
    for (pair, temp) in &staged {
        rename_step(fs, &mut log, out, &pair.from, temp)?;
    }

    log.log(&format!("Phase 2: moving {} files into place", staged.len()))?;
    for (pair, temp) in &staged {
        rename_step(fs, &mut log, out, temp, &pair.to)?;
    }

    log.log("Apply complete")?;
    Ok(result)
}

fn rename_step<F, W>(
    fs: &F,
    log: &mut ApplyLog,
    out: &mut W,
    from: &Path,
    to: &Path,
) -> RenameResult<()>
where
    F: AssetFs + ?Sized,
    W: Write + ?Sized,
{
    if let Err(e) = fs.rename(from, to) {
        log.log(&format!(
            "Error renaming {} -> {}: {}",
            from.display(),
            to.display(),
            e
        ))?;
        return Err(RenameError::io(
            format!("Failed to rename {} to {}", from.display(), to.display()),
            e,
        ));
    }
    log.log(&format!("Renamed: {} -> {}", from.display(), to.display()))?;
    report(out, "RENAMED", from, to)
}

fn report<W: Write + ?Sized>(out: &mut W, marker: &str, from: &Path, to: &Path) -> RenameResult<()> {
    writeln!(out, "{}: {} -> {}", marker, from.display(), to.display())
        .map_err(|e| RenameError::io("Failed to write output", e))
}
