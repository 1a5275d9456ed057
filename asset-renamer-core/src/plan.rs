use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RenameError, RenameResult};
use crate::fs::{AssetFs, DirEntry, EntryKind};
use crate::rules::NamingRule;

/// Marker appended to a source file name while it is parked between phases.
pub const TEMP_SUFFIX: &str = ".__tmp__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePair {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenamePair {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Where the source is parked during a two-phase apply.
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .from
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(TEMP_SUFFIX);
        self.from.with_file_name(name)
    }

    pub fn inverse(&self) -> Self {
        Self::new(self.to.clone(), self.from.clone())
    }
}

/// Renames for one directory, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub renames: Vec<RenamePair>,
}

impl RenamePlan {
    pub fn new(renames: Vec<RenamePair>) -> Self {
        Self { renames }
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenamePair> {
        self.renames.iter()
    }

    /// The plan that undoes this one.
    pub fn inverse(&self) -> Self {
        Self::new(self.renames.iter().map(RenamePair::inverse).collect())
    }
}

impl<'a> IntoIterator for &'a RenamePlan {
    type Item = &'a RenamePair;
    type IntoIter = std::slice::Iter<'a, RenamePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.renames.iter()
    }
}

/// Scan `dir` (not recursively) and plan renames with `rule`.
///
/// Only regular files are considered; symlinks are skipped rather than
/// followed. Files are visited in file-name order so plans are reproducible.
pub fn build_plan<F, R>(fs: &F, dir: &Path, rule: &R) -> RenameResult<RenamePlan>
where
    F: AssetFs + ?Sized,
    R: NamingRule,
{
    let entries = fs
        .list_dir(dir)
        .map_err(|e| RenameError::io(format!("Failed to read directory {}", dir.display()), e))?;

    let mut candidates: Vec<(String, DirEntry)> = entries
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::File)
        .filter_map(|entry| {
            let name = entry.file_name()?.to_string();
            rule.is_eligible(&name).then_some((name, entry))
        })
        .collect();
    candidates.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut state = R::State::default();
    let mut renames = Vec::new();

    for (name, entry) in candidates {
        let Some(stem) = Path::new(&name).file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(new_name) = rule.destination(stem, &mut state) else {
            continue;
        };
        if new_name == name {
            continue;
        }
        renames.push(RenamePair::new(
            entry.path.clone(),
            entry.path.with_file_name(new_name),
        ));
    }

    Ok(RenamePlan::new(renames))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::rules::{MidiNameRule, WeaponFrameRule};

    fn names(plan: &RenamePlan) -> Vec<(String, String)> {
        plan.iter()
            .map(|p| {
                (
                    p.from.file_name().unwrap().to_string_lossy().into_owned(),
                    p.to.file_name().unwrap().to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_weapon_plan_in_name_order() {
        let fs = MemoryFs::new();
        for name in ["RIFLE-3.png", "RIFLE-1.png", "RIFLE-10.png", "RIFLE-2.png", "RIFLE-ICON.png"] {
            fs.add_file(format!("w/RIFLE/{name}"));
        }

        let plan = build_plan(&fs, Path::new("w/RIFLE"), &WeaponFrameRule).unwrap();
        assert_eq!(
            names(&plan),
            vec![
                pair("RIFLE-1.png", "RIFLE-PICKUP.png"),
                pair("RIFLE-10.png", "RIFLE-SHOOT-8.png"),
                pair("RIFLE-2.png", "RIFLE-IDLE.png"),
                pair("RIFLE-3.png", "RIFLE-SHOOT-1.png"),
            ]
        );
        assert_eq!(plan.renames[0].to, Path::new("w/RIFLE/RIFLE-PICKUP.png"));
    }

    #[test]
    fn test_weapon_plan_skips_ineligible_entries() {
        let fs = MemoryFs::new();
        fs.add_file("w/RIFLE/README");
        fs.add_file("w/RIFLE/notes.txt");
        fs.add_file("w/RIFLE/RIFLE-1.bmp");
        fs.add_file("w/RIFLE/RIFLE-icon.PNG");
        fs.add_symlink("w/RIFLE/RIFLE-2.png");
        fs.add_dir("w/RIFLE/RIFLE-3.png");
        fs.add_file("w/RIFLE/nested/RIFLE-4.png");

        let plan = build_plan(&fs, Path::new("w/RIFLE"), &WeaponFrameRule).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_uppercase_png_extension_is_eligible() {
        let fs = MemoryFs::new();
        fs.add_file("w/RIFLE-1.PNG");

        let plan = build_plan(&fs, Path::new("w"), &WeaponFrameRule).unwrap();
        assert_eq!(names(&plan), vec![pair("RIFLE-1.PNG", "RIFLE-PICKUP.png")]);
    }

    #[test]
    fn test_midi_plan_dedupes_in_sort_order() {
        let fs = MemoryFs::new();
        fs.add_file("m/Theme.mid");
        fs.add_file("m/THEME!!.mid");

        let plan = build_plan(&fs, Path::new("m"), &MidiNameRule).unwrap();
        assert_eq!(
            names(&plan),
            vec![pair("THEME!!.mid", "THEME.MID"), pair("Theme.mid", "THEME-2.MID")]
        );
    }

    #[test]
    fn test_midi_plan_counts_files_already_canonical() {
        let fs = MemoryFs::new();
        fs.add_file("m/THEME.MID");
        fs.add_file("m/theme.mid");

        let plan = build_plan(&fs, Path::new("m"), &MidiNameRule).unwrap();
        assert_eq!(names(&plan), vec![pair("theme.mid", "THEME-2.MID")]);
    }

    #[test]
    fn test_canonical_directory_plans_nothing_twice() {
        let fs = MemoryFs::new();
        fs.add_file("m/MY-THEME-LOOP.MID");
        fs.add_file("m/BOSS.MID");
        fs.add_file("m/cover.png");

        let first = build_plan(&fs, Path::new("m"), &MidiNameRule).unwrap();
        let second = build_plan(&fs, Path::new("m"), &MidiNameRule).unwrap();
        assert!(first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let fs = MemoryFs::new();
        let err = build_plan(&fs, Path::new("nowhere"), &MidiNameRule).unwrap_err();
        assert!(matches!(err, RenameError::Io { .. }));
    }

    #[test]
    fn test_temp_path_appends_marker() {
        let pair = RenamePair::new("w/RIFLE-1.png", "w/RIFLE-PICKUP.png");
        assert_eq!(pair.temp_path(), Path::new("w/RIFLE-1.png.__tmp__"));
    }

    #[test]
    fn test_inverse_swaps_every_pair() {
        let plan = RenamePlan::new(vec![
            RenamePair::new("d/A", "d/B"),
            RenamePair::new("d/B", "d/A"),
        ]);
        let inverse = plan.inverse();
        assert_eq!(inverse.renames[0], RenamePair::new("d/B", "d/A"));
        assert_eq!(inverse.renames[1], RenamePair::new("d/A", "d/B"));
    }
}
