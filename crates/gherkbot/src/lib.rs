//! Convert Gherkin feature files into Robot Framework test scripts.
//!
//! The pipeline has three stages:
//!
//! - [`parse`] turns feature text into a typed [`Document`];
//! - [`transpile`] renders a document as Robot Framework script text;
//! - [`sync`] mirrors a directory of feature files into a directory of
//!   scripts, creating, updating and deleting outputs as sources change.
//!
//! Single files can be converted with [`convert_file`] and written with
//! [`write_output`].
//!
//! ```
//! let script = gherkbot::convert_source(
//!     "Feature: Basic Test\n  Scenario: A simple scenario\n    Given a step\n",
//! )
//! .expect("valid gherkin");
//! assert!(script.contains("*** Test Cases ***\nA simple scenario\n    Given a step\n"));
//! ```

pub mod ast;
mod convert;
mod error;
mod keyword;
mod parser;
pub mod sync;
mod transpile;

pub use ast::{
    Background, Child, DataTable, DocString, Document, Examples, Feature, Location, Scenario,
    ScenarioKind, Step,
};
pub use convert::{convert_file, convert_source, write_output};
pub use error::{AstError, ConvertError, ParseError, SyncError};
pub use keyword::StepKeyword;
pub use parser::parse;
pub use sync::{SyncAction, SyncEntry, SyncOptions, SyncPlan, SyncReport, TreeIndex, sync, sync_with};
pub use transpile::{BACKGROUND_KEYWORD, transpile};
