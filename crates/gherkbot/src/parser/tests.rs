//! Tests for mapping `gherkin` output onto the document model.

use super::*;
use crate::ast::{Child, ScenarioKind};
use crate::keyword::StepKeyword;

#[expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]
fn parse_feature(text: &str) -> Feature {
    parse(text)
        .expect("feature should parse")
        .feature
        .expect("document should hold a feature")
}

#[test]
fn parses_basic_scenario_without_trailing_newline() {
    let feature = parse_feature(concat!(
        "Feature: Basic Test\n",
        "  Scenario: A simple scenario\n",
        "    Given a step\n",
        "    When another step\n",
        "    Then a final step",
    ));
    assert_eq!(feature.name, "Basic Test");
    let scenarios: Vec<_> = feature.scenarios().collect();
    assert_eq!(scenarios.len(), 1);
    let Some(scenario) = scenarios.first() else {
        panic!("expected a scenario");
    };
    assert_eq!(scenario.kind, ScenarioKind::Scenario);
    assert_eq!(scenario.name, "A simple scenario");
    let keywords: Vec<_> = scenario.steps.iter().map(|s| s.keyword.clone()).collect();
    assert_eq!(
        keywords,
        [StepKeyword::Given, StepKeyword::When, StepKeyword::Then]
    );
    let texts: Vec<_> = scenario.steps.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["a step", "another step", "a final step"]);
}

#[test]
fn background_precedes_scenarios_and_keeps_its_name() {
    let feature = parse_feature(concat!(
        "Feature: With background\n",
        "  Background: shared setup\n",
        "    Given a global setup\n",
        "  Scenario: First\n",
        "    When I do something\n",
    ));
    let Some(Child::Background(background)) = feature.children.first() else {
        panic!("background should be the first child");
    };
    assert_eq!(background.name.as_deref(), Some("shared setup"));
    assert_eq!(background.steps.len(), 1);
    assert!(matches!(feature.children.get(1), Some(Child::Scenario(_))));
}

#[test]
fn outline_examples_split_header_and_body() {
    let feature = parse_feature(concat!(
        "Feature: Outline\n",
        "  Scenario Outline: eating\n",
        "    Given there are <start> cucumbers\n",
        "    Examples: small\n",
        "      | start | eat | left |\n",
        "      | 12    | 5   | 7    |\n",
        "      | 20    | 5   | 15   |\n",
    ));
    let Some(outline) = feature.scenarios().next() else {
        panic!("expected an outline");
    };
    assert!(outline.is_outline());
    let Some(examples) = outline.examples.first() else {
        panic!("expected an examples block");
    };
    assert_eq!(examples.name(), Some("small"));
    assert_eq!(examples.header(), ["start", "eat", "left"]);
    assert_eq!(
        examples.body(),
        [
            vec!["12".to_string(), "5".to_string(), "7".to_string()],
            vec!["20".to_string(), "5".to_string(), "15".to_string()],
        ]
    );
}

#[test]
fn captures_data_tables_and_doc_strings() {
    let feature = parse_feature(concat!(
        "Feature: Arguments\n",
        "  Scenario: With arguments\n",
        "    Given the following users are registered:\n",
        "      | name  | email       |\n",
        "      | Alice | alice@e.com |\n",
        "    When I send the following message:\n",
        "      ```\n",
        "      Hello World!\n",
        "      This is a test.\n",
        "      ```\n",
    ));
    let Some(scenario) = feature.scenarios().next() else {
        panic!("expected a scenario");
    };
    let Some(table) = scenario.steps.first().and_then(|s| s.data_table.as_ref()) else {
        panic!("first step should carry a table");
    };
    assert_eq!(
        table.rows.first().map(Vec::as_slice),
        Some(["name".to_string(), "email".to_string()].as_slice())
    );
    let Some(doc) = scenario.steps.get(1).and_then(|s| s.doc_string.as_ref()) else {
        panic!("second step should carry a doc string");
    };
    assert_eq!(doc.content, "Hello World!\nThis is a test.");
    assert_eq!(doc.delimiter, "```");
    assert_eq!(doc.media_type, None);
}

#[test]
fn rule_scenarios_are_flattened_in_order() {
    let feature = parse_feature(concat!(
        "Feature: Rules\n",
        "  Scenario: top\n",
        "    Given a\n",
        "  Rule: grouped\n",
        "    Scenario: nested\n",
        "      Given b\n",
    ));
    let names: Vec<_> = feature.scenarios().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["top", "nested"]);
}

#[test]
fn comment_only_documents_have_no_feature() {
    let Ok(document) = parse("# just a note\n\n   # another\n") else {
        panic!("comment-only text should parse");
    };
    assert!(document.feature.is_none());
    assert_eq!(document.comments, ["just a note", "another"]);
}

#[test]
fn empty_text_has_no_feature() {
    assert!(matches!(parse(""), Ok(Document { feature: None, .. })));
}

#[test]
fn malformed_text_is_a_syntax_error() {
    let result = parse("this is not gherkin\n");
    assert!(matches!(result, Err(ParseError::Syntax(_))));
}

#[test]
fn comments_inside_doc_strings_are_content() {
    let Ok(document) = parse(concat!(
        "# top comment\n",
        "Feature: Comments\n",
        "  Scenario: s\n",
        "    Given text\n",
        "      \"\"\"\n",
        "      # not a comment\n",
        "      \"\"\"\n",
    )) else {
        panic!("feature should parse");
    };
    assert_eq!(document.comments, ["top comment"]);
}
