//! File discovery for source and output trees.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn process_dir_entry(entry: DirEntry, extension: &str) -> Option<PathBuf> {
    if entry.file_type().is_dir() {
        return None;
    }
    let path = entry.into_path();
    // `is_file` follows symlinks, so dangling links are skipped.
    (path.is_file() && has_extension(&path, extension)).then_some(path)
}

fn convert_walkdir_error(err: walkdir::Error) -> Option<io::Error> {
    if err.loop_ancestor().is_some() {
        return None;
    }
    let err_str = err.to_string();
    Some(err.into_io_error().unwrap_or_else(|| io::Error::other(err_str)))
}

/// Collect files under `base` whose extension matches `extension`
/// (ASCII case-insensitive), sorted by path.
///
/// A missing `base` yields an empty list.
pub(super) fn collect_files(base: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    if !base.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for next in WalkDir::new(base).follow_links(false) {
        match next {
            Ok(entry) => files.extend(process_dir_entry(entry, extension)),
            Err(err) => {
                if let Some(err) = convert_walkdir_error(err) {
                    return Err(err);
                }
            }
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[expect(clippy::expect_used, reason = "test fixture I/O must succeed")]
    fn collects_matching_files_recursively_and_sorted() {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path();
        fs::create_dir_all(root.join("b/nested")).expect("create dirs");
        for name in ["z.feature", "a.FEATURE", "b/nested/c.feature", "notes.txt"] {
            fs::write(root.join(name), "").expect("write fixture");
        }
        let files = collect_files(root, "feature").expect("scan tree");
        let relative: Vec<_> = files
            .iter()
            .filter_map(|p| p.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .collect();
        assert_eq!(
            relative,
            [
                PathBuf::from("a.FEATURE"),
                PathBuf::from("b/nested/c.feature"),
                PathBuf::from("z.feature"),
            ]
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "test fixture I/O must succeed")]
    fn missing_root_is_empty() {
        let dir = TempDir::new().expect("create temp dir");
        let files = collect_files(&dir.path().join("absent"), "robot").expect("scan");
        assert!(files.is_empty());
    }
}
