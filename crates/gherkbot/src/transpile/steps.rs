//! Step formatting shared by test cases and keyword bodies.

use super::outline::Placeholders;
use super::render::{CONTINUATION, INDENT};
use crate::ast::{DataTable, DocString, Step};

/// Format steps as indented Robot Framework lines.
///
/// Each step becomes `    <Keyword> <text>`; doc string lines and data-table
/// rows follow as continuation lines. When `placeholders` is given, outline
/// placeholders are rewritten to variable references in every emitted line.
pub(super) fn format_steps(steps: &[Step], placeholders: Option<&Placeholders<'_>>) -> Vec<String> {
    let rewrite = |text: &str| placeholders.map_or_else(|| text.to_string(), |p| p.rewrite(text));

    let mut lines = Vec::with_capacity(steps.len());
    for step in steps {
        lines.push(format!(
            "{INDENT}{} {}",
            step.keyword.as_str().trim(),
            rewrite(&step.text)
        ));
        if let Some(doc) = step.doc_string.as_ref() {
            lines.extend(doc_string_lines(doc).map(|line| continuation(&rewrite(line))));
        }
        if let Some(table) = step.data_table.as_ref() {
            lines.extend(table_lines(table).map(|row| continuation(&rewrite(&row))));
        }
    }
    lines
}

fn doc_string_lines(doc: &DocString) -> impl Iterator<Item = &str> {
    doc.lines()
}

fn table_lines(table: &DataTable) -> impl Iterator<Item = String> + '_ {
    table
        .rows
        .iter()
        .map(|cells| format!("| {} |", cells.join(" | ")))
}

fn continuation(value: &str) -> String {
    format!("{INDENT}{CONTINUATION}{INDENT}{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::StepKeyword;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn formats_plain_steps() {
        let steps = [
            Step::new(StepKeyword::Given, "a step"),
            Step::new(StepKeyword::parse(" And  "), "another"),
            Step::new(StepKeyword::Other("*".into()), "a bullet"),
        ];
        assert_eq!(
            format_steps(&steps, None),
            ["    Given a step", "    And another", "    * a bullet"]
        );
    }

    #[test]
    fn emits_doc_string_lines_as_continuations() {
        let step = Step::new(StepKeyword::When, "I send the following message:")
            .with_doc_string(DocString::new("Hello World!\nThis is a test."));
        assert_eq!(
            format_steps(&[step], None),
            [
                "    When I send the following message:",
                "    ...    Hello World!",
                "    ...    This is a test.",
            ]
        );
    }

    #[test]
    fn emits_table_rows_as_pipe_continuations() {
        let step = Step::new(StepKeyword::Given, "the following users are registered:")
            .with_data_table(DataTable::new(vec![
                cells(&["name", "email"]),
                cells(&["Alice", "alice@e.com"]),
            ]));
        assert_eq!(
            format_steps(&[step], None),
            [
                "    Given the following users are registered:",
                "    ...    | name | email |",
                "    ...    | Alice | alice@e.com |",
            ]
        );
    }

    #[test]
    fn rewrites_placeholders_in_every_line() {
        let columns = cells(&["user"]);
        let placeholders = Placeholders::new(&columns);
        let step = Step::new(StepKeyword::Given, "<user> logs in")
            .with_data_table(DataTable::new(vec![cells(&["<user>", "<other>"])]));
        assert_eq!(
            format_steps(&[step], Some(&placeholders)),
            ["    Given ${user} logs in", "    ...    | ${user} | <other> |"]
        );
    }
}
