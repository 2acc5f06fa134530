//! Tree indexing and change planning.
//!
//! Both trees are loaded once into flat maps keyed by the file's path
//! relative to its root with the extension removed. Planning is then pure
//! set algebra over the two key sets.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::warn;

use super::discovery::collect_files;

/// A file recorded in a [`TreeIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFile {
    /// Absolute (root-joined) path of the file.
    pub path: PathBuf,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
}

/// Flat index of one directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeIndex {
    files: BTreeMap<PathBuf, IndexedFile>,
}

impl TreeIndex {
    /// Index the files under `root` that carry `extension`.
    ///
    /// A missing root yields an empty index. Extensions match regardless of
    /// case, so `a.FEATURE` and `a.feature` share the key `a`; the first path
    /// in sorted order is kept and the other is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the tree cannot be walked.
    pub fn scan(root: &Path, extension: &str) -> io::Result<Self> {
        let mut files: BTreeMap<PathBuf, IndexedFile> = BTreeMap::new();
        for path in collect_files(root, extension)? {
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let key = relative.with_extension("");
            match files.entry(key) {
                Entry::Occupied(entry) => {
                    warn!(
                        kept = %entry.get().path.display(),
                        ignored = %path.display(),
                        "files differ only in extension case; ignoring duplicate"
                    );
                }
                Entry::Vacant(entry) => {
                    let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
                    entry.insert(IndexedFile { path, modified });
                }
            }
        }
        Ok(Self { files })
    }

    /// Build an index from pre-computed entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (PathBuf, IndexedFile)>) -> Self {
        Self {
            files: entries.into_iter().collect(),
        }
    }

    /// Look up a file by its extension-less relative key.
    #[must_use]
    pub fn get(&self, key: &Path) -> Option<&IndexedFile> {
        self.files.get(key)
    }

    /// Iterate over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Number of indexed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Return `true` when the tree holds no matching files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Keys grouped by the action a synchronisation must take.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Sources with no output yet.
    pub create: Vec<PathBuf>,
    /// Sources modified after their output.
    pub update: Vec<PathBuf>,
    /// Outputs whose source no longer exists.
    pub delete: Vec<PathBuf>,
    /// Outputs that are up to date.
    pub unchanged: Vec<PathBuf>,
}

impl SyncPlan {
    /// Compare a source index against an output index.
    ///
    /// An output is stale only when its source is strictly newer. When
    /// either modification time is unknown the output is regenerated.
    #[must_use]
    pub fn compute(sources: &TreeIndex, outputs: &TreeIndex) -> Self {
        let mut plan = Self::default();
        for (key, source) in &sources.files {
            match outputs.get(key) {
                None => plan.create.push(key.clone()),
                Some(output) if is_stale(source, output) => plan.update.push(key.clone()),
                Some(_) => plan.unchanged.push(key.clone()),
            }
        }
        plan.delete = outputs
            .keys()
            .filter(|key| sources.get(key).is_none())
            .map(Path::to_path_buf)
            .collect();
        plan
    }

    /// Return `true` when the plan writes or deletes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

fn is_stale(source: &IndexedFile, output: &IndexedFile) -> bool {
    match (source.modified, output.modified) {
        (Some(src), Some(out)) => src > out,
        _ => true,
    }
}
