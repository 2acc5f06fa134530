//! Semantic error types for conversion and synchronisation.
//!
//! Single-file operations surface these errors directly so callers can
//! identify the offending path. The synchroniser records them per file in its
//! report instead of aborting the batch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Violations of the AST model invariants, raised at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// An Examples header contained no cells.
    #[error("examples table has an empty header row")]
    EmptyExamplesHeader,

    /// An Examples body row has a different cell count to its header.
    #[error("examples row {row} has {actual} cells, expected {expected}")]
    ExamplesArity {
        /// Zero-based index of the offending body row.
        row: usize,
        /// Number of header cells.
        expected: usize,
        /// Number of cells found in the row.
        actual: usize,
    },
}

/// Failures of the parse boundary.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text is not syntactically valid Gherkin.
    #[error("invalid gherkin: {0}")]
    Syntax(#[from] gherkin::ParseError),

    /// The parsed document could not be represented in the AST model.
    #[error("invalid document structure: {0}")]
    Model(#[from] AstError),
}

/// Errors raised when converting a single feature file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The source file could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Path of the malformed feature file.
        path: PathBuf,
        /// Underlying parse failure.
        source: ParseError,
    },

    /// The generated script could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl ConvertError {
    /// Path of the file the failure relates to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => path,
        }
    }

    /// Return `true` when the failure is a parse failure rather than I/O.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Errors that stop a directory synchronisation before any file is touched.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source directory does not exist or is not a directory.
    #[error("source directory not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// A source or target extension is empty, so no file could match it.
    #[error("{role} extension must not be empty")]
    EmptyExtension {
        /// Which extension was empty, `source` or `target`.
        role: &'static str,
    },

    /// The output path exists but is not a directory.
    #[error("output path is not a directory: {}", .0.display())]
    OutputNotDirectory(PathBuf),

    /// Walking one of the trees failed.
    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        /// Root of the tree being scanned.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
