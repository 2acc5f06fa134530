//! Scenario outline support: template naming and placeholder rewriting.

use std::sync::LazyLock;

use convert_case::{Case, Casing};
use regex::{Captures, Regex};

/// Matches `<placeholder>` tokens, capturing the name without brackets.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^<>]+)>").unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

const TEMPLATE_SUFFIX: &str = "Template";
const FALLBACK_STEM: &str = "Outline";

/// Rewrites `<column>` placeholders to `${column}` variable references.
///
/// Only names present in `columns` are rewritten; any other angle-bracketed
/// text is left untouched.
#[derive(Debug, Clone, Copy)]
pub(super) struct Placeholders<'a> {
    columns: &'a [String],
}

impl<'a> Placeholders<'a> {
    pub(super) fn new(columns: &'a [String]) -> Self {
        Self { columns }
    }

    pub(super) fn rewrite(&self, text: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                match caps.get(1).map(|m| m.as_str()) {
                    Some(name) if self.columns.iter().any(|c| c == name) => format!("${{{name}}}"),
                    _ => whole.to_string(),
                }
            })
            .into_owned()
    }
}

/// Derive an identifier-safe template keyword name from a scenario name.
///
/// `is_taken` reports names already registered; a numeric suffix is appended
/// until the result is free.
pub(super) fn template_name(scenario_name: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let stem: String = scenario_name
        .to_case(Case::Pascal)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    let stem = if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    };
    let base = format!("{stem}{TEMPLATE_SUFFIX}");
    if !is_taken(&base) {
        return base;
    }
    (2_usize..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or(base)
}

/// Name of the test case generated for one Examples row.
pub(super) fn example_case_name(scenario_name: &str, row: &[String]) -> String {
    format!("{scenario_name} example for {}", row.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("eating", "EatingTemplate")]
    #[case("A simple outline", "ASimpleOutlineTemplate")]
    #[case("user logs-in", "UserLogsInTemplate")]
    #[case("!!!", "OutlineTemplate")]
    #[case("", "OutlineTemplate")]
    fn derives_template_names(#[case] scenario: &str, #[case] expected: &str) {
        assert_eq!(template_name(scenario, |_| false), expected);
    }

    #[test]
    fn suffixes_colliding_template_names() {
        let taken = ["EatingTemplate", "EatingTemplate2"];
        assert_eq!(
            template_name("eating", |name| taken.contains(&name)),
            "EatingTemplate3"
        );
    }

    #[rstest]
    #[case("there are <start> cucumbers", "there are ${start} cucumbers")]
    #[case("I eat <eat> and keep <left>", "I eat ${eat} and keep ${left}")]
    #[case("<unknown> stays", "<unknown> stays")]
    #[case("a <b <start> c", "a <b ${start} c")]
    #[case("no placeholders", "no placeholders")]
    fn rewrites_known_columns_only(#[case] text: &str, #[case] expected: &str) {
        let columns = ["start", "eat", "left"].map(String::from);
        assert_eq!(Placeholders::new(&columns).rewrite(text), expected);
    }

    #[test]
    fn names_example_cases_after_their_cells() {
        let row = ["12", "5", "7"].map(String::from);
        assert_eq!(example_case_name("eating", &row), "eating example for 12, 5, 7");
    }
}
