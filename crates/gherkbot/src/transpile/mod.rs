//! Transpiler: feature document in, Robot Framework script out.
//!
//! Transpilation walks the feature's children once, threading a `Suite`
//! accumulator through the per-child step. The accumulator collects settings
//! directives, test cases, keyword definitions and the set of referenced step
//! texts; `render` then assembles the sections. The function is pure: the
//! same document always yields the same text.

use std::collections::BTreeSet;

use tracing::warn;

use crate::ast::{Background, Child, Document, Examples, Feature, Scenario};

mod outline;
mod render;
mod steps;

use outline::{Placeholders, example_case_name, template_name};
use steps::format_steps;

/// Name of the synthetic keyword that runs the feature background.
pub const BACKGROUND_KEYWORD: &str = "Run Background Steps";

/// Body of a generated test case.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TestBody {
    /// Formatted step lines.
    Steps(Vec<String>),
    /// Literal cell values passed to the suite's test template.
    ExampleRow(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TestCase {
    name: String,
    body: TestBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KeywordDefinition {
    name: String,
    arguments: Vec<String>,
    body: Vec<String>,
}

/// Accumulated suite content for one feature.
#[derive(Debug, Default)]
struct Suite {
    documentation: Vec<String>,
    setup: Option<String>,
    templates: Vec<String>,
    test_cases: Vec<TestCase>,
    keywords: Vec<KeywordDefinition>,
    referenced: BTreeSet<String>,
}

impl Suite {
    fn for_feature(feature: &Feature) -> Self {
        let mut documentation = vec![format!("Feature: {}", feature.name)];
        if let Some(description) = feature.description.as_deref() {
            documentation.extend(
                description
                    .trim()
                    .lines()
                    .map(|line| line.trim().to_string()),
            );
        }
        Self {
            documentation,
            ..Self::default()
        }
    }

    fn has_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| k.name == name)
    }

    fn reference_steps<'s>(&mut self, texts: impl IntoIterator<Item = &'s str>) {
        self.referenced.extend(texts.into_iter().map(ToString::to_string));
    }

    fn add_child(mut self, child: &Child) -> Self {
        match child {
            Child::Background(background) => self.add_background(background),
            Child::Scenario(scenario) if scenario.is_outline() => self.add_outline(scenario),
            Child::Scenario(scenario) => self.add_scenario(scenario),
        }
        self
    }

    fn add_background(&mut self, background: &Background) {
        if self.setup.is_some() {
            warn!(
                line = background.location.line,
                "only the first background is rendered; ignoring"
            );
            return;
        }
        self.setup = Some(BACKGROUND_KEYWORD.to_string());
        self.keywords.push(KeywordDefinition {
            name: BACKGROUND_KEYWORD.to_string(),
            arguments: Vec::new(),
            body: format_steps(&background.steps, None),
        });
        self.reference_steps(background.steps.iter().map(|s| s.text.as_str()));
    }

    fn add_scenario(&mut self, scenario: &Scenario) {
        self.test_cases.push(TestCase {
            name: scenario.name.clone(),
            body: TestBody::Steps(format_steps(&scenario.steps, None)),
        });
        self.reference_steps(scenario.steps.iter().map(|s| s.text.as_str()));
    }

    fn add_outline(&mut self, scenario: &Scenario) {
        let name = template_name(&scenario.name, |candidate| self.has_keyword(candidate));
        let columns = scenario
            .examples
            .first()
            .map(Examples::header)
            .unwrap_or_default();
        let placeholders = Placeholders::new(columns);

        self.templates.push(name.clone());
        self.keywords.push(KeywordDefinition {
            name,
            arguments: columns.to_vec(),
            body: format_steps(&scenario.steps, Some(&placeholders)),
        });
        for row in scenario.examples.iter().flat_map(|e| e.body()) {
            self.test_cases.push(TestCase {
                name: example_case_name(&scenario.name, row),
                body: TestBody::ExampleRow(row.clone()),
            });
        }
        self.reference_steps(scenario.steps.iter().map(|s| s.text.as_str()));
    }

    /// Referenced step texts with no matching keyword definition, sorted.
    fn stubs(&self) -> impl Iterator<Item = &str> {
        self.referenced
            .iter()
            .map(String::as_str)
            .filter(|text| !self.has_keyword(text))
    }
}

/// Transpile a parsed document into Robot Framework script text.
///
/// A document without a feature yields an empty string. Otherwise the output
/// ends with exactly one newline.
///
/// # Examples
///
/// ```
/// use gherkbot::{parse, transpile};
///
/// let doc = parse("Feature: Basic Test\n  Scenario: s\n    Given a step\n")
///     .expect("valid gherkin");
/// let script = transpile(&doc);
/// assert!(script.starts_with("*** Settings ***\nDocumentation    Feature: Basic Test\n"));
/// assert!(script.contains("\ns\n    Given a step\n"));
/// ```
#[must_use]
pub fn transpile(document: &Document) -> String {
    document.feature.as_ref().map_or_else(String::new, |feature| {
        let suite = feature
            .children
            .iter()
            .fold(Suite::for_feature(feature), Suite::add_child);
        render::render(&suite)
    })
}
