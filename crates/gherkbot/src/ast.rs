//! Typed in-memory model of a parsed feature document.
//!
//! The model is produced once by the parser, consumed by the transpiler and
//! then dropped. It holds no back-references and offers no behaviour beyond
//! construction-time validation of its invariants:
//!
//! - a feature child is exactly one of background or scenario, encoded by
//!   [`Child`] being an enum;
//! - every Examples body row has the same number of cells as its header,
//!   enforced by [`Examples::new`].

use crate::error::AstError;
use crate::keyword::StepKeyword;

/// Position of a node in the source text (1-based line and column).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Location {
    /// Create a location from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A free-text block attached to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocString {
    /// Literal content, without delimiters or their indentation.
    pub content: String,
    /// Delimiter used in the source (`"""` or three backticks).
    pub delimiter: String,
    /// Optional media type written after the opening delimiter.
    pub media_type: Option<String>,
}

impl DocString {
    /// Create a `"""`-delimited doc string without a media type.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            delimiter: "\"\"\"".to_string(),
            media_type: None,
        }
    }

    /// Iterate over the content lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

/// Rows of cells attached to a step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    /// Ordered rows; each row is an ordered list of cell values.
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a table from rows of cells.
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

/// A single step line together with its optional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Introducing keyword.
    pub keyword: StepKeyword,
    /// Step body with the keyword stripped. This is the step's identity for
    /// keyword lookup.
    pub text: String,
    /// Attached doc string, if any.
    pub doc_string: Option<DocString>,
    /// Attached data table, if any.
    pub data_table: Option<DataTable>,
    /// Source position of the step line.
    pub location: Location,
}

impl Step {
    /// Create a step without arguments.
    #[must_use]
    pub fn new(keyword: StepKeyword, text: impl Into<String>) -> Self {
        Self {
            keyword,
            text: text.into(),
            doc_string: None,
            data_table: None,
            location: Location::default(),
        }
    }

    /// Attach a doc string.
    #[must_use]
    pub fn with_doc_string(mut self, doc_string: DocString) -> Self {
        self.doc_string = Some(doc_string);
        self
    }

    /// Attach a data table.
    #[must_use]
    pub fn with_data_table(mut self, table: DataTable) -> Self {
        self.data_table = Some(table);
        self
    }

    /// Set the source position.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// Steps shared by every scenario of a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    /// Optional name following `Background:`.
    pub name: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Ordered steps.
    pub steps: Vec<Step>,
    /// Source position of the background keyword.
    pub location: Location,
}

impl Background {
    /// Create an unnamed background.
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }
}

/// Whether a scenario is plain or parameterised by Examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    /// A plain scenario (`Scenario:` / `Example:`).
    Scenario,
    /// A scenario outline (`Scenario Outline:` / `Scenario Template:`).
    Outline,
}

/// A scenario or scenario outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Plain or outline.
    pub kind: ScenarioKind,
    /// Keyword text as written in the source.
    pub keyword: String,
    /// Scenario name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Ordered steps.
    pub steps: Vec<Step>,
    /// Examples blocks; non-empty only for outlines.
    pub examples: Vec<Examples>,
    /// Tags applied to the scenario.
    pub tags: Vec<String>,
    /// Source position of the scenario keyword.
    pub location: Location,
}

impl Scenario {
    /// Create a plain scenario.
    #[must_use]
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            kind: ScenarioKind::Scenario,
            keyword: "Scenario".to_string(),
            name: name.into(),
            description: None,
            steps,
            examples: Vec::new(),
            tags: Vec::new(),
            location: Location::default(),
        }
    }

    /// Create a scenario outline.
    #[must_use]
    pub fn outline(name: impl Into<String>, steps: Vec<Step>, examples: Vec<Examples>) -> Self {
        Self {
            kind: ScenarioKind::Outline,
            keyword: "Scenario Outline".to_string(),
            examples,
            ..Self::new(name, steps)
        }
    }

    /// Attach tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Return `true` for scenario outlines.
    #[must_use]
    pub fn is_outline(&self) -> bool {
        self.kind == ScenarioKind::Outline
    }
}

/// An Examples block belonging to a scenario outline.
///
/// Fields are private so the header/body arity invariant cannot be broken
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Examples {
    name: Option<String>,
    header: Vec<String>,
    body: Vec<Vec<String>>,
    tags: Vec<String>,
    location: Location,
}

impl Examples {
    /// Create an Examples block from its header and body rows.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::EmptyExamplesHeader`] when the header has no cells
    /// and [`AstError::ExamplesArity`] when a body row's cell count differs
    /// from the header's.
    pub fn new(header: Vec<String>, body: Vec<Vec<String>>) -> Result<Self, AstError> {
        if header.is_empty() {
            return Err(AstError::EmptyExamplesHeader);
        }
        if let Some((row, cells)) = body
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != header.len())
        {
            return Err(AstError::ExamplesArity {
                row,
                expected: header.len(),
                actual: cells.len(),
            });
        }
        Ok(Self {
            name: None,
            header,
            body,
            tags: Vec::new(),
            location: Location::default(),
        })
    }

    /// Set the optional block name.
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.trim().is_empty());
        self
    }

    /// Attach tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the source position.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Optional block name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Column names, in header order.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows; each has exactly `header().len()` cells.
    #[must_use]
    pub fn body(&self) -> &[Vec<String>] {
        &self.body
    }

    /// Tags applied to this block.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Source position of the Examples keyword.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }
}

/// A direct child of a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// A background block.
    Background(Background),
    /// A scenario or scenario outline.
    Scenario(Scenario),
}

impl From<Background> for Child {
    fn from(background: Background) -> Self {
        Self::Background(background)
    }
}

impl From<Scenario> for Child {
    fn from(scenario: Scenario) -> Self {
        Self::Scenario(scenario)
    }
}

/// A feature and its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Keyword text as written in the source.
    pub keyword: String,
    /// Feature name.
    pub name: String,
    /// Free-text, possibly multi-line description.
    pub description: Option<String>,
    /// Backgrounds and scenarios in declaration order.
    pub children: Vec<Child>,
    /// Tags applied to the feature.
    pub tags: Vec<String>,
    /// Dialect of the source document.
    pub language: String,
    /// Source position of the feature keyword.
    pub location: Location,
}

impl Feature {
    /// Create an empty feature with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            keyword: "Feature".to_string(),
            name: name.into(),
            description: None,
            children: Vec::new(),
            tags: Vec::new(),
            language: "en".to_string(),
            location: Location::default(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Iterate over background children in declaration order.
    pub fn backgrounds(&self) -> impl Iterator<Item = &Background> {
        self.children.iter().filter_map(|child| match child {
            Child::Background(background) => Some(background),
            Child::Scenario(_) => None,
        })
    }

    /// Iterate over scenario children in declaration order.
    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.children.iter().filter_map(|child| match child {
            Child::Scenario(scenario) => Some(scenario),
            Child::Background(_) => None,
        })
    }
}

/// Root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// The feature, absent for documents holding only comments or blanks.
    pub feature: Option<Feature>,
    /// Comment lines, without their leading `#`.
    pub comments: Vec<String>,
}

impl Document {
    /// A document without a feature.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl From<Feature> for Document {
    fn from(feature: Feature) -> Self {
        Self {
            feature: Some(feature),
            comments: Vec::new(),
        }
    }
}
