//! Directory synchronisation of feature files into generated scripts.
//!
//! A sync indexes the source and output trees once, computes a
//! [`SyncPlan`] and then executes it file by file. Per-file failures are
//! recorded in the [`SyncReport`] and never abort the batch. Concurrent syncs
//! into one output tree are not coordinated.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::convert::{convert_file, write_output};
use crate::error::SyncError;

mod discovery;
mod plan;
mod report;

pub use plan::{IndexedFile, SyncPlan, TreeIndex};
pub use report::{SyncAction, SyncEntry, SyncReport};

const DEFAULT_SOURCE_EXTENSION: &str = "feature";
const DEFAULT_TARGET_EXTENSION: &str = "robot";

/// File extensions used to match sources and name outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    source_extension: String,
    target_extension: String,
}

impl SyncOptions {
    /// Create options from two extensions; a leading `.` is ignored.
    #[must_use]
    pub fn new(source_extension: &str, target_extension: &str) -> Self {
        Self {
            source_extension: normalise_extension(source_extension),
            target_extension: normalise_extension(target_extension),
        }
    }

    /// Extension of feature files, without the dot.
    #[must_use]
    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }

    /// Extension of generated scripts, without the dot.
    #[must_use]
    pub fn target_extension(&self) -> &str {
        &self.target_extension
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_EXTENSION, DEFAULT_TARGET_EXTENSION)
    }
}

fn normalise_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}

/// Synchronise `source` into `output` with the default extensions.
///
/// # Errors
///
/// See [`sync_with`].
pub fn sync(source: &Path, output: &Path) -> Result<SyncReport, SyncError> {
    sync_with(source, output, &SyncOptions::default())
}

/// Mirror every feature file under `source` as a script under `output`.
///
/// Outputs are created for new sources, regenerated when their source is
/// newer and deleted when their source is gone; directories left empty by a
/// deletion are pruned up to, but excluding, `output`. Sources that fail to
/// parse are skipped and leave no output or directory behind.
///
/// # Errors
///
/// Returns [`SyncError::EmptyExtension`] when either extension in `options`
/// is empty, [`SyncError::MissingSource`] when `source` is not a directory,
/// [`SyncError::OutputNotDirectory`] when `output` exists as a file and
/// [`SyncError::Scan`] when either tree cannot be walked. Nothing is written
/// in these cases.
pub fn sync_with(
    source: &Path,
    output: &Path,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    if options.source_extension().is_empty() {
        return Err(SyncError::EmptyExtension { role: "source" });
    }
    if options.target_extension().is_empty() {
        return Err(SyncError::EmptyExtension { role: "target" });
    }
    if !source.is_dir() {
        return Err(SyncError::MissingSource(source.to_path_buf()));
    }
    if output.exists() && !output.is_dir() {
        return Err(SyncError::OutputNotDirectory(output.to_path_buf()));
    }
    let sources = scan(source, options.source_extension())?;
    let outputs = scan(output, options.target_extension())?;
    let plan = SyncPlan::compute(&sources, &outputs);
    debug!(
        create = plan.create.len(),
        update = plan.update.len(),
        delete = plan.delete.len(),
        unchanged = plan.unchanged.len(),
        "planned sync"
    );

    let run = SyncRun {
        output,
        options,
        sources: &sources,
        outputs: &outputs,
    };
    let mut report = SyncReport::default();
    for key in &plan.create {
        run.generate(key, SyncAction::Created, &mut report);
    }
    for key in &plan.update {
        run.generate(key, SyncAction::Updated, &mut report);
    }
    for key in &plan.delete {
        run.remove(key, &mut report);
    }
    for key in &plan.unchanged {
        report.record(run.relative_output(key), SyncAction::Unchanged);
    }
    Ok(report)
}

fn scan(root: &Path, extension: &str) -> Result<TreeIndex, SyncError> {
    TreeIndex::scan(root, extension).map_err(|source| SyncError::Scan {
        path: root.to_path_buf(),
        source,
    })
}

struct SyncRun<'a> {
    output: &'a Path,
    options: &'a SyncOptions,
    sources: &'a TreeIndex,
    outputs: &'a TreeIndex,
}

impl SyncRun<'_> {
    fn relative_output(&self, key: &Path) -> PathBuf {
        let mut name = OsString::from(key.as_os_str());
        name.push(".");
        name.push(self.options.target_extension());
        PathBuf::from(name)
    }

    fn generate(&self, key: &Path, success: SyncAction, report: &mut SyncReport) {
        let relative = self.relative_output(key);
        let Some(source) = self.sources.get(key) else {
            return;
        };
        let script = match convert_file(&source.path) {
            Ok(script) => script,
            Err(error) if error.is_parse() => {
                info!(path = %source.path.display(), %error, "skipping unparsable feature");
                report.record(relative, SyncAction::Skipped(error.to_string()));
                return;
            }
            Err(error) => {
                warn!(path = %source.path.display(), %error, "failed to read feature");
                report.record(relative, SyncAction::Failed(error.to_string()));
                return;
            }
        };
        // Regenerate over the existing file so its name casing is kept.
        let target = self
            .outputs
            .get(key)
            .map_or_else(|| self.output.join(&relative), |file| file.path.clone());
        match write_output(&target, &script) {
            Ok(()) => {
                info!(path = %target.display(), action = %success, "wrote script");
                report.record(relative, success);
            }
            Err(error) => {
                warn!(path = %target.display(), %error, "failed to write script");
                report.record(relative, SyncAction::Failed(error.to_string()));
            }
        }
    }

    fn remove(&self, key: &Path, report: &mut SyncReport) {
        let Some(file) = self.outputs.get(key) else {
            return;
        };
        let relative = file
            .path
            .strip_prefix(self.output)
            .map_or_else(|_| self.relative_output(key), Path::to_path_buf);
        match fs::remove_file(&file.path) {
            Ok(()) => {
                info!(path = %file.path.display(), "deleted orphaned script");
                if let Some(parent) = file.path.parent() {
                    prune_empty_dirs(parent, self.output);
                }
                report.record(relative, SyncAction::Deleted);
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                report.record(relative, SyncAction::Deleted);
            }
            Err(error) => {
                warn!(path = %file.path.display(), %error, "failed to delete script");
                report.record(
                    relative,
                    SyncAction::Failed(format!("failed to delete {}: {error}", file.path.display())),
                );
            }
        }
    }
}

/// Remove empty directories from `start` upwards, stopping below `root`.
fn prune_empty_dirs(start: &Path, root: &Path) {
    let mut current = start;
    while current != root && current.starts_with(root) {
        match fs::remove_dir(current) {
            Ok(()) => debug!(path = %current.display(), "pruned empty directory"),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(_) => break,
        }
        let Some(parent) = current.parent() else {
            break;
        };
        current = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("feature", "feature")]
    #[case(".feature", "feature")]
    #[case(" .robot ", "robot")]
    fn normalises_extensions(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalise_extension(raw), expected);
    }

    #[test]
    fn default_options_use_feature_and_robot() {
        let options = SyncOptions::default();
        assert_eq!(options.source_extension(), "feature");
        assert_eq!(options.target_extension(), "robot");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "test fixture I/O must succeed")]
    fn pruning_stops_at_non_empty_directory_and_root() {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path();
        fs::create_dir_all(root.join("a/b/c")).expect("create dirs");
        fs::write(root.join("a/keep.robot"), "").expect("write fixture");

        prune_empty_dirs(&root.join("a/b/c"), root);

        assert!(!root.join("a/b").exists());
        assert!(root.join("a/keep.robot").exists());
        assert!(root.exists());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "test fixture I/O must succeed")]
    fn pruning_never_removes_the_root() {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path().join("out");
        fs::create_dir_all(root.join("only")).expect("create dirs");

        prune_empty_dirs(&root.join("only"), &root);

        assert!(!root.join("only").exists());
        assert!(root.is_dir());
    }

    #[test]
    fn relative_output_appends_target_extension() {
        let options = SyncOptions::new("feature", ".robot");
        let index = TreeIndex::default();
        let run = SyncRun {
            output: Path::new("out"),
            options: &options,
            sources: &index,
            outputs: &index,
        };
        assert_eq!(
            run.relative_output(Path::new("dir/v1.2")),
            PathBuf::from("dir/v1.2.robot")
        );
    }
}
