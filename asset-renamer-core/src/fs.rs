//! Filesystem access used by planning, validation, and apply.
//!
//! Everything that touches the disk goes through [`AssetFs`], so the whole
//! pipeline can run against [`MemoryFs`] in tests and against [`RealFs`] in
//! the binary.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a directory entry is, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    /// File name as UTF-8, or `None` for names that are not valid UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

pub trait AssetFs {
    /// Kind of the entry at `path`, or `None` if nothing is there.
    fn kind(&self, path: &Path) -> io::Result<Option<EntryKind>>;

    /// Entries directly inside `dir`, in no particular order.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Whether `a` and `b` resolve to the same path.
    fn same_file(&self, a: &Path, b: &Path) -> io::Result<bool>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(self.kind(path)?.is_some())
    }

    /// Whether `path` is a directory once symlinks are followed.
    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(self.kind(path)? == Some(EntryKind::Dir))
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl AssetFs for RealFs {
    fn kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        match fs::symlink_metadata(path) {
            Ok(meta) => Ok(Some(kind_of(meta.file_type()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            entries.push(DirEntry {
                path: entry.path(),
                kind: kind_of(entry.file_type()?),
            });
        }
        Ok(entries)
    }

    /// Compares resolved paths, not inodes: a hard link is a different file
    /// here, since renaming one link onto another leaves both in place.
    fn same_file(&self, a: &Path, b: &Path) -> io::Result<bool> {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(ca), Ok(cb)) => Ok(ca == cb),
            (Err(e), _) | (_, Err(e)) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Dir,
    Symlink,
    /// A regular file; the id stands in for its content.
    File(u64),
}

#[derive(Debug, Default)]
struct MemoryState {
    /// Keyed by the lookup form of the path; the value keeps the spelled path.
    nodes: BTreeMap<String, (PathBuf, Node)>,
    next_id: u64,
    failing: HashSet<PathBuf>,
    renames: usize,
}

/// In-memory filesystem for tests.
///
/// Renames follow POSIX semantics: a rename onto an existing file replaces it.
/// With [`MemoryFs::case_insensitive`] lookups ignore ASCII case while the
/// stored names keep their spelling, like the default macOS volume.
#[derive(Debug, Default)]
pub struct MemoryFs {
    state: RefCell<MemoryState>,
    case_insensitive: bool,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
            ..Self::default()
        }
    }

    fn key(&self, path: &Path) -> String {
        let s = path.to_string_lossy().into_owned();
        if self.case_insensitive {
            s.to_ascii_lowercase()
        } else {
            s
        }
    }

    fn insert(&self, path: &Path, node: Node) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.contains(parent) {
                self.add_dir(parent);
            }
        }
        let key = self.key(path);
        self.state
            .borrow_mut()
            .nodes
            .insert(key, (path.to_path_buf(), node));
    }

    fn contains(&self, path: &Path) -> bool {
        self.state.borrow().nodes.contains_key(&self.key(path))
    }

    /// Create a directory and any missing parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Dir);
    }

    /// Create a regular file (and its parents) and return its content id.
    pub fn add_file(&self, path: impl AsRef<Path>) -> u64 {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            state.next_id
        };
        self.insert(path.as_ref(), Node::File(id));
        id
    }

    pub fn add_symlink(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Symlink);
    }

    /// Make every later rename whose source is `path` fail with `PermissionDenied`.
    pub fn fail_rename_from(&self, path: impl AsRef<Path>) {
        self.state
            .borrow_mut()
            .failing
            .insert(path.as_ref().to_path_buf());
    }

    /// Content id of the file at `path`.
    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<u64> {
        match self.state.borrow().nodes.get(&self.key(path.as_ref())) {
            Some((_, Node::File(id))) => Some(*id),
            _ => None,
        }
    }

    /// Sorted names of the entries directly inside `dir`.
    pub fn names_in(&self, dir: impl AsRef<Path>) -> Vec<String> {
        let mut names: Vec<String> = self
            .list_dir(dir.as_ref())
            .unwrap_or_default()
            .iter()
            .filter_map(|e| e.file_name().map(str::to_string))
            .collect();
        names.sort();
        names
    }

    /// Number of successful renames performed so far.
    pub fn rename_count(&self) -> usize {
        self.state.borrow().renames
    }
}

impl AssetFs for MemoryFs {
    fn kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        Ok(self
            .state
            .borrow()
            .nodes
            .get(&self.key(path))
            .map(|(_, node)| match node {
                Node::Dir => EntryKind::Dir,
                Node::Symlink => EntryKind::Symlink,
                Node::File(_) => EntryKind::File,
            }))
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        match self.kind(dir)? {
            Some(EntryKind::Dir) => {},
            Some(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("not a directory: {}", dir.display()),
                ))
            },
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", dir.display()),
                ))
            },
        }

        let dir_key = self.key(dir);
        let state = self.state.borrow();
        Ok(state
            .nodes
            .values()
            .filter(|(path, _)| path.parent().map(|p| self.key(p)) == Some(dir_key.clone()))
            .map(|(path, node)| DirEntry {
                path: path.clone(),
                kind: match node {
                    Node::Dir => EntryKind::Dir,
                    Node::Symlink => EntryKind::Symlink,
                    Node::File(_) => EntryKind::File,
                },
            })
            .collect())
    }

    fn same_file(&self, a: &Path, b: &Path) -> io::Result<bool> {
        let state = self.state.borrow();
        match (state.nodes.get(&self.key(a)), state.nodes.get(&self.key(b))) {
            (Some((_, Node::File(x))), Some((_, Node::File(y)))) => Ok(x == y),
            (Some(_), Some(_)) => Ok(self.key(a) == self.key(b)),
            _ => Ok(false),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.state.borrow().failing.contains(from) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", from.display()),
            ));
        }

        let from_key = self.key(from);
        let to_key = self.key(to);
        let mut state = self.state.borrow_mut();

        let Some((_, node)) = state.nodes.remove(&from_key) else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", from.display()),
            ));
        };
        if let Some(parent) = to.parent() {
            if !parent.as_os_str().is_empty() && !state.nodes.contains_key(&self.key(parent)) {
                state
                    .nodes
                    .insert(from_key, (from.to_path_buf(), node));
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", parent.display()),
                ));
            }
        }

        state.nodes.insert(to_key, (to.to_path_buf(), node));
        state.renames += 1;
        Ok(())
    }
}
