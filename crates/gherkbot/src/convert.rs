//! Single-file conversion helpers.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConvertError, ParseError};
use crate::parser::parse;
use crate::transpile::transpile;

/// Parse feature text and transpile it in one step.
///
/// # Errors
///
/// Returns a [`ParseError`] when the text is not a valid feature.
pub fn convert_source(text: &str) -> Result<String, ParseError> {
    parse(text).map(|document| transpile(&document))
}

/// Read and convert a feature file.
///
/// # Errors
///
/// Returns [`ConvertError::Read`] when the file cannot be read as UTF-8 and
/// [`ConvertError::Parse`] when its contents are not a valid feature.
pub fn convert_file(path: &Path) -> Result<String, ConvertError> {
    let text = fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let script = convert_source(&text).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = script.len(), "converted feature file");
    Ok(script)
}

/// Write a generated script, creating parent directories as needed.
///
/// Existing files are overwritten in full.
///
/// # Errors
///
/// Returns [`ConvertError::Write`] when a directory or the file cannot be
/// written.
pub fn write_output(path: &Path, script: &str) -> Result<(), ConvertError> {
    let write_error = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, script).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[expect(clippy::expect_used, reason = "tests require a scratch directory")]
    fn scratch() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    #[test]
    fn converts_source_text() {
        let Ok(script) = convert_source("Feature: Tiny\n") else {
            panic!("feature should convert");
        };
        assert_eq!(script, "*** Settings ***\nDocumentation    Feature: Tiny\n");
    }

    #[test]
    fn comment_only_source_converts_to_empty_output() {
        assert!(matches!(convert_source("# nothing here\n").as_deref(), Ok("")));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = scratch();
        let path = dir.path().join("absent.feature");
        let Err(error) = convert_file(&path) else {
            panic!("missing file should fail");
        };
        assert!(matches!(error, ConvertError::Read { .. }));
        assert_eq!(error.path(), path);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "test fixture writes must succeed")]
    fn malformed_file_is_a_parse_error() {
        let dir = scratch();
        let path = dir.path().join("broken.feature");
        fs::write(&path, "not gherkin at all\n").expect("write fixture");
        let Err(error) = convert_file(&path) else {
            panic!("malformed file should fail");
        };
        assert!(error.is_parse());
        assert!(error.to_string().contains("broken.feature"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "test fixture I/O must succeed")]
    fn write_output_creates_parents_and_overwrites() {
        let dir = scratch();
        let path = dir.path().join("nested/deeper/out.robot");
        write_output(&path, "first\n").expect("first write");
        write_output(&path, "second\n").expect("second write");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "second\n");
    }
}
