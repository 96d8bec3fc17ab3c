//! Rule engine shared by all platform parsers.
//!
//! A [`FieldRules`] table is an ordered list of patterns for one field. The
//! first pattern that matches wins; for prices, a capture that does not
//! normalize to a number counts as a miss and the next pattern is tried.

pub mod dates;
pub mod patterns;
pub mod price;
pub mod recap;

pub use dates::{nights_between, parse_dotted_date};
pub use price::{format_eur, format_eur_fr, normalize_price};
pub use recap::{extract_recap, reline_recap};

use regex::{Captures, Regex, RegexBuilder};
use rust_decimal::Decimal;
use tracing::trace;

/// Compile a field pattern: case-insensitive, `.` matches newlines.
///
/// Patterns are static data, so an invalid one is a programming error.
pub fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid field pattern {:?}: {}", pattern, e))
}

/// A value found by a rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the rule that produced the value (0 = most trusted).
    pub rule: usize,
    /// Whole text matched by the pattern.
    pub source: String,
    /// Byte range of the match in the source text.
    pub position: (usize, usize),
}

/// One pattern and the capture group holding the value.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pattern: Regex,
    group: usize,
}

impl FieldRule {
    pub fn new(pattern: &str, group: usize) -> Self {
        Self {
            pattern: compile(pattern),
            group,
        }
    }

    fn capture<'t>(&self, caps: &Captures<'t>) -> Option<&'t str> {
        caps.get(self.group).map(|m| m.as_str().trim()).filter(|s| !s.is_empty())
    }
}

/// Ordered rules for a single field.
#[derive(Debug, Clone)]
pub struct FieldRules {
    rules: Vec<FieldRule>,
}

impl FieldRules {
    /// Rules capturing group 1 of each pattern, in priority order.
    pub fn new(patterns: &[&str]) -> Self {
        Self {
            rules: patterns.iter().map(|p| FieldRule::new(p, 1)).collect(),
        }
    }

    /// Rules with an explicit capture group per pattern.
    pub fn with_groups(rules: &[(&str, usize)]) -> Self {
        Self {
            rules: rules.iter().map(|(p, g)| FieldRule::new(p, *g)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First match of any rule, mapped through `convert`.
    ///
    /// A rule whose capture is empty or rejected by `convert` is skipped.
    pub fn first_match<T>(
        &self,
        text: &str,
        convert: impl Fn(&str) -> Option<T>,
    ) -> Option<ExtractionMatch<T>> {
        for (index, rule) in self.rules.iter().enumerate() {
            let Some(caps) = rule.pattern.captures(text) else {
                continue;
            };
            let Some(raw) = rule.capture(&caps) else {
                continue;
            };
            let Some(value) = convert(raw) else {
                trace!("Rule {} matched '{}' but the value was rejected", index, raw);
                continue;
            };

            let whole = caps.get(0).map(|m| (m.start(), m.end(), m.as_str())).unwrap_or((0, 0, ""));
            trace!("Rule {} matched '{}'", index, raw);
            return Some(ExtractionMatch {
                value,
                rule: index,
                source: whole.2.to_string(),
                position: (whole.0, whole.1),
            });
        }
        None
    }

    /// First captured text, trimmed.
    pub fn first_text(&self, text: &str) -> Option<String> {
        self.first_match(text, |raw| Some(raw.to_string())).map(|m| m.value)
    }

    /// First capture that normalizes to a price.
    pub fn first_price(&self, text: &str) -> Option<Decimal> {
        self.first_price_match(text).map(|m| m.value)
    }

    /// Like [`FieldRules::first_price`], keeping the matched source text.
    pub fn first_price_match(&self, text: &str) -> Option<ExtractionMatch<Decimal>> {
        self.first_match(text, normalize_price)
    }

    /// Captures of the first matching rule, for multi-group patterns.
    pub fn first_captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.rules.iter().find_map(|rule| rule.pattern.captures(text))
    }
}
