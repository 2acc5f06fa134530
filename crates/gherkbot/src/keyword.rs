//! Step keyword vocabulary and parsing utilities.
//!
//! Gherkin step keywords form a closed vocabulary (`Given`, `When`, `Then`,
//! `And`, `But`). Anything outside that set, such as the `*` bullet keyword,
//! is carried through verbatim in [`StepKeyword::Other`] so rendering stays
//! exact while callers can still dispatch on the known variants.

use std::fmt;

/// Keyword that introduces a step.
///
/// Parsing is total: unknown keywords are preserved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
    /// Keyword outside the closed vocabulary, trimmed but otherwise verbatim.
    Other(String),
}

impl StepKeyword {
    /// Parse a raw keyword as it appears in a feature file.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkbot::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::parse("Given "), StepKeyword::Given);
    /// assert_eq!(StepKeyword::parse(" * "), StepKeyword::Other("*".into()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("given") {
            Self::Given
        } else if trimmed.eq_ignore_ascii_case("when") {
            Self::When
        } else if trimmed.eq_ignore_ascii_case("then") {
            Self::Then
        } else if trimmed.eq_ignore_ascii_case("and") {
            Self::And
        } else if trimmed.eq_ignore_ascii_case("but") {
            Self::But
        } else {
            Self::Other(trimmed.to_string())
        }
    }

    /// Return the keyword as it should be rendered.
    ///
    /// Known keywords use their canonical spelling; [`Self::Other`] returns
    /// the preserved source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StepKeyword {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Given", StepKeyword::Given)]
    #[case("given", StepKeyword::Given)]
    #[case(" WhEn ", StepKeyword::When)]
    #[case("THEN", StepKeyword::Then)]
    #[case("AND ", StepKeyword::And)]
    #[case(" but ", StepKeyword::But)]
    fn parses_case_insensitively(#[case] input: &str, #[case] expected: StepKeyword) {
        assert_eq!(StepKeyword::parse(input), expected);
    }

    #[rstest]
    #[case("* ", "*")]
    #[case("  Soit ", "Soit")]
    fn passes_unknown_keywords_through(#[case] input: &str, #[case] expected: &str) {
        let keyword = StepKeyword::parse(input);
        assert_eq!(keyword, StepKeyword::Other(expected.to_string()));
        assert_eq!(keyword.as_str(), expected);
    }

    #[test]
    fn as_str_returns_canonical_name() {
        assert_eq!(StepKeyword::Given.as_str(), "Given");
        assert_eq!(StepKeyword::When.as_str(), "When");
        assert_eq!(StepKeyword::Then.as_str(), "Then");
        assert_eq!(StepKeyword::And.as_str(), "And");
        assert_eq!(StepKeyword::But.as_str(), "But");
    }
}
