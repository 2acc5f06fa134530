//! Parse boundary: feature text in, AST model out.
//!
//! Syntactic parsing is delegated to the `gherkin` crate. This module maps
//! its output onto the crate's own [`Document`] model and fills in what the
//! `gherkin` AST does not carry (doc string delimiters and media types,
//! background and Examples names, comments) by scanning the raw text.
//!
//! Parsing never yields a partial document: either every node converts or the
//! whole call fails.

use std::ops::Range;

use gherkin::{GherkinEnv, LineCol};
use tracing::{debug, warn};

use crate::ast::{
    Background, Child, DataTable, DocString, Document, Examples, Feature, Location, Scenario,
    ScenarioKind, Step,
};
use crate::error::ParseError;
use crate::keyword::StepKeyword;

mod docstring;

#[derive(Clone, Copy, Debug)]
struct FeatureSource<'a>(&'a str);

impl<'a> FeatureSource<'a> {
    fn new(source: &'a str) -> Self {
        Self(source)
    }

    fn get(&self, range: Range<usize>) -> Option<&'a str> {
        self.0.get(range)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    /// Return the 1-based `line` of the source, if present.
    fn line(&self, line: usize) -> Option<&'a str> {
        self.0.lines().nth(line.checked_sub(1)?)
    }
}

#[derive(Clone, Copy, Debug)]
struct LineContent<'a>(&'a str);

impl<'a> LineContent<'a> {
    fn new(line: &'a str) -> Self {
        Self(line)
    }

    fn as_str(&self) -> &'a str {
        self.0
    }

    fn trim_start(&self) -> &'a str {
        self.0.trim_start()
    }
}

/// Parse feature text into a [`Document`].
///
/// Text made only of blank lines and `#` comments yields a document without
/// a feature rather than an error.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] when the text is not valid Gherkin and
/// [`ParseError::Model`] when an Examples table breaks the model invariants.
///
/// # Examples
///
/// ```
/// let doc = gherkbot::parse("Feature: Basic Test\n").expect("valid gherkin");
/// assert_eq!(doc.feature.map(|f| f.name).as_deref(), Some("Basic Test"));
/// ```
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let mut normalised = text.to_string();
    normalise_trailing_newline(&mut normalised);
    let source = FeatureSource::new(&normalised);
    let comments = collect_comments(source);

    if is_blank_document(source) {
        debug!("document holds no feature");
        return Ok(Document {
            feature: None,
            comments,
        });
    }

    let parsed = gherkin::Feature::parse(normalised.as_str(), GherkinEnv::default())?;
    let feature = build_feature(source, &parsed)?;
    debug!(
        feature = %feature.name,
        children = feature.children.len(),
        "parsed feature"
    );
    Ok(Document {
        feature: Some(feature),
        comments,
    })
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn is_blank_document(source: FeatureSource<'_>) -> bool {
    source
        .0
        .lines()
        .all(|line| line.trim().is_empty() || is_comment(line))
}

/// Collect `#` comment lines that sit outside doc strings.
fn collect_comments(source: FeatureSource<'_>) -> Vec<String> {
    let mut comments = Vec::new();
    let mut open_delimiter: Option<&str> = None;
    for line in source.0.lines() {
        let trimmed = line.trim_start();
        match open_delimiter {
            Some(delim) if trimmed.starts_with(delim) => open_delimiter = None,
            Some(_) => {}
            None if trimmed.starts_with("\"\"\"") => open_delimiter = Some("\"\"\""),
            None if trimmed.starts_with("```") => open_delimiter = Some("```"),
            None => {
                if let Some(comment) = trimmed.strip_prefix('#') {
                    comments.push(comment.trim().to_string());
                }
            }
        }
    }
    comments
}

fn location(position: &LineCol) -> Location {
    Location::new(position.line, position.col)
}

/// Recover the title written after `Keyword:` on the given source line.
fn title_at(source: FeatureSource<'_>, line: usize) -> Option<String> {
    source
        .line(line)
        .and_then(|text| text.split_once(':'))
        .map(|(_, title)| title.trim())
        .filter(|title| !title.is_empty())
        .map(ToString::to_string)
}

fn non_blank(text: Option<&String>) -> Option<String> {
    text.map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

fn build_feature(
    source: FeatureSource<'_>,
    parsed: &gherkin::Feature,
) -> Result<Feature, ParseError> {
    let mut children = Vec::new();
    if let Some(background) = parsed.background.as_ref() {
        children.push(Child::Background(build_background(source, background)));
    }
    for scenario in &parsed.scenarios {
        children.push(Child::Scenario(build_scenario(source, scenario)?));
    }
    for rule in &parsed.rules {
        if let Some(background) = rule.background.as_ref() {
            warn!(
                line = background.position.line,
                "rule backgrounds are not supported; ignoring"
            );
        }
        for scenario in &rule.scenarios {
            children.push(Child::Scenario(build_scenario(source, scenario)?));
        }
    }

    Ok(Feature {
        keyword: parsed.keyword.trim().to_string(),
        name: parsed.name.trim().to_string(),
        description: non_blank(parsed.description.as_ref()),
        children,
        tags: parsed.tags.clone(),
        language: "en".to_string(),
        location: location(&parsed.position),
    })
}

fn build_background(source: FeatureSource<'_>, background: &gherkin::Background) -> Background {
    Background {
        name: title_at(source, background.position.line),
        description: non_blank(background.description.as_ref()),
        steps: build_steps(source, &background.steps),
        location: location(&background.position),
    }
}

fn is_outline_keyword(keyword: &str) -> bool {
    let keyword = keyword.trim();
    keyword.eq_ignore_ascii_case("Scenario Outline")
        || keyword.eq_ignore_ascii_case("Scenario Template")
}

fn build_scenario(
    source: FeatureSource<'_>,
    scenario: &gherkin::Scenario,
) -> Result<Scenario, ParseError> {
    let examples = build_examples(source, &scenario.examples)?;
    let kind = if is_outline_keyword(&scenario.keyword) || !scenario.examples.is_empty() {
        ScenarioKind::Outline
    } else {
        ScenarioKind::Scenario
    };
    Ok(Scenario {
        kind,
        keyword: scenario.keyword.trim().to_string(),
        name: scenario.name.trim().to_string(),
        description: non_blank(scenario.description.as_ref()),
        steps: build_steps(source, &scenario.steps),
        examples,
        tags: scenario.tags.clone(),
        location: location(&scenario.position),
    })
}

fn build_examples(
    source: FeatureSource<'_>,
    blocks: &[gherkin::Examples],
) -> Result<Vec<Examples>, ParseError> {
    let mut examples = Vec::with_capacity(blocks.len());
    for block in blocks {
        let Some(table) = block.table.as_ref() else {
            warn!(line = block.position.line, "examples block without a table; ignoring");
            continue;
        };
        let mut rows = table.rows.iter();
        let Some(header) = rows.next() else {
            continue;
        };
        let parsed = Examples::new(header.clone(), rows.cloned().collect())?
            .with_name(title_at(source, block.position.line))
            .with_tags(block.tags.clone())
            .at(location(&block.position));
        examples.push(parsed);
    }
    Ok(examples)
}

fn build_steps(source: FeatureSource<'_>, steps: &[gherkin::Step]) -> Vec<Step> {
    steps.iter().map(|step| build_step(source, step)).collect()
}

fn build_step(source: FeatureSource<'_>, step: &gherkin::Step) -> Step {
    let data_table = step.table.as_ref().map(|t| DataTable::new(t.rows.clone()));
    let doc_string = step.docstring.as_ref().map(|value| {
        let start_from = step.table.as_ref().map_or(step.span.end, |t| t.span.end);
        docstring::find_doc_string(source, start_from).map_or_else(
            || DocString::new(docstring::dedent(value)),
            docstring::DocStringBlock::into_doc_string,
        )
    });
    Step {
        keyword: StepKeyword::parse(&step.keyword),
        text: step.value.clone(),
        doc_string,
        data_table,
        location: location(&step.position),
    }
}

#[cfg(test)]
mod tests;
