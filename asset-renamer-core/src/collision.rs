use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{RenameError, RenameResult};
use crate::fs::AssetFs;
use crate::plan::RenamePlan;

/// Check a plan before anything is renamed.
///
/// Fails if two sources claim one destination (every such destination is
/// reported), if a destination already exists and the plan does not move it
/// out of the way first, or if a temporary name is already taken.
pub fn validate_plan<F>(fs: &F, plan: &RenamePlan) -> RenameResult<()>
where
    F: AssetFs + ?Sized,
{
    let destinations = duplicate_destinations(plan);
    if !destinations.is_empty() {
        return Err(RenameError::Collision { destinations });
    }

    let sources: HashSet<&Path> = plan.iter().map(|p| p.from.as_path()).collect();

    for pair in plan {
        if !exists(fs, &pair.to)? {
            continue;
        }
        // Sources are all parked under temporary names before any
        // destination is claimed, so landing on one is safe.
        if sources.contains(pair.to.as_path()) {
            continue;
        }
        let same = fs.same_file(&pair.from, &pair.to).map_err(|e| {
            RenameError::io(
                format!(
                    "Failed to compare {} with {}",
                    pair.from.display(),
                    pair.to.display()
                ),
                e,
            )
        })?;
        if !same {
            return Err(RenameError::Overwrite(pair.to.clone()));
        }
    }

    for pair in plan {
        let temp = pair.temp_path();
        if exists(fs, &temp)? {
            return Err(RenameError::TemporaryExists(temp));
        }
    }

    Ok(())
}

/// Destinations claimed by more than one source, in first-seen order.
pub fn duplicate_destinations(plan: &RenamePlan) -> Vec<PathBuf> {
    let mut counts: HashMap<&Path, usize> = HashMap::new();
    for pair in plan {
        *counts.entry(pair.to.as_path()).or_insert(0) += 1;
    }

    let mut reported = HashSet::new();
    plan.iter()
        .map(|p| p.to.as_path())
        .filter(|to| counts[to] > 1 && reported.insert(*to))
        .map(Path::to_path_buf)
        .collect()
}

fn exists<F: AssetFs + ?Sized>(fs: &F, path: &Path) -> RenameResult<bool> {
    fs.exists(path)
        .map_err(|e| RenameError::io(format!("Failed to inspect {}", path.display()), e))
}
