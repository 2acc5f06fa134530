//! Section assembly for Robot Framework scripts.

use super::{KeywordDefinition, Suite, TestBody, TestCase};

/// Indentation of body lines, also used as the cell separator.
pub(super) const INDENT: &str = "    ";
/// Robot Framework line-continuation marker.
pub(super) const CONTINUATION: &str = "...";

const SETTINGS_HEADER: &str = "*** Settings ***";
const TEST_CASES_HEADER: &str = "*** Test Cases ***";
const KEYWORDS_HEADER: &str = "*** Keywords ***";
const STUB_FAILURE: &str = "Fail    Not Implemented";

pub(super) fn render(suite: &Suite) -> String {
    let mut lines = Vec::new();
    settings(suite, &mut lines);
    lines.push(String::new());

    if !suite.test_cases.is_empty() {
        lines.push(TEST_CASES_HEADER.to_string());
        for case in &suite.test_cases {
            test_case(case, &mut lines);
            lines.push(String::new());
        }
    }

    let mut stubs = suite.stubs().peekable();
    if !suite.keywords.is_empty() || stubs.peek().is_some() {
        lines.push(KEYWORDS_HEADER.to_string());
        for keyword in &suite.keywords {
            keyword_definition(keyword, &mut lines);
            lines.push(String::new());
        }
        for stub in stubs {
            lines.push(stub.to_string());
            lines.push(format!("{INDENT}# TODO: implement keyword \"{stub}\"."));
            lines.push(format!("{INDENT}{STUB_FAILURE}"));
            lines.push(String::new());
        }
    }

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return String::new();
    }
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn settings(suite: &Suite, lines: &mut Vec<String>) {
    lines.push(SETTINGS_HEADER.to_string());
    let mut documentation = suite.documentation.iter();
    if let Some(first) = documentation.next() {
        lines.push(format!("Documentation{INDENT}{first}"));
    }
    lines.extend(documentation.map(|line| continuation_line(line)));
    if let Some(setup) = suite.setup.as_deref() {
        lines.push(format!("Test Setup       {setup}"));
    }
    lines.extend(
        suite
            .templates
            .iter()
            .map(|template| format!("Test Template{INDENT}{template}")),
    );
}

fn continuation_line(text: &str) -> String {
    format!("{CONTINUATION}{INDENT}{text}").trim_end().to_string()
}

fn test_case(case: &TestCase, lines: &mut Vec<String>) {
    match &case.body {
        TestBody::Steps(steps) => {
            lines.push(case.name.clone());
            lines.extend(steps.iter().cloned());
        }
        TestBody::ExampleRow(cells) => {
            let values: String = cells.iter().map(|cell| format!("{INDENT}{cell}")).collect();
            lines.push(format!("{}{values}", case.name));
        }
    }
}

fn keyword_definition(keyword: &KeywordDefinition, lines: &mut Vec<String>) {
    lines.push(keyword.name.clone());
    if !keyword.arguments.is_empty() {
        let arguments: String = keyword
            .arguments
            .iter()
            .map(|arg| format!("{INDENT}${{{arg}}}"))
            .collect();
        lines.push(format!("{INDENT}[Arguments]{arguments}"));
    }
    lines.extend(keyword.body.iter().cloned());
}
