//! String schema.

use std::sync::Arc;

use regex::Regex;
use veris_value::Value;

use crate::check::Check;
use crate::format;
use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode};
use crate::schema::{Schema, conversion_error};

/// Accepts text. Sizes count characters, not bytes.
#[derive(Debug, Clone)]
pub struct StringSchema {
    node: SchemaNode,
}

pub fn string() -> StringSchema {
    StringSchema {
        node: SchemaNode::new(TypeCode::String, Def::String),
    }
}

impl Schema for StringSchema {
    type Output = String;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        StringSchema { node }
    }

    fn decode(&self, value: Value) -> Result<String, ParseError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(conversion_error("string", &other)),
        }
    }
}

impl StringSchema {
    pub fn min(&self, minimum: usize) -> Self {
        self.with_check(Check::min_size(minimum, None))
    }

    pub fn max(&self, maximum: usize) -> Self {
        self.with_check(Check::max_size(maximum, None))
    }

    pub fn length(&self, expected: usize) -> Self {
        self.with_check(Check::exact_size(expected, None))
    }

    pub fn nonempty(&self) -> Self {
        self.min(1)
    }

    /// Full-match is the caller's choice: anchor the pattern if needed.
    pub fn regex(&self, pattern: Regex) -> Self {
        self.with_check(Check::format(
            "pattern",
            Arc::new(move |s| pattern.is_match(s)),
            None,
        ))
    }

    /// [`StringSchema::regex`] from a pattern string.
    ///
    /// # Panics
    ///
    /// Panics when the pattern does not compile; an invalid pattern is a
    /// construction-time programming error.
    pub fn pattern(&self, pattern: &str) -> Self {
        let compiled = Regex::new(pattern)
            .unwrap_or_else(|error| panic!("invalid pattern {pattern:?}: {error}"));
        self.regex(compiled)
    }

    pub fn email(&self) -> Self {
        self.with_check(Check::format("email", Arc::new(format::is_email), None))
    }

    pub fn url(&self) -> Self {
        self.with_check(Check::format("url", Arc::new(format::is_url), None))
    }

    pub fn uuid(&self) -> Self {
        self.with_check(Check::format("uuid", Arc::new(format::is_uuid), None))
    }

    pub fn cuid(&self) -> Self {
        self.with_check(Check::format("cuid", Arc::new(format::is_cuid), None))
    }

    pub fn cuid2(&self) -> Self {
        self.with_check(Check::format("cuid2", Arc::new(format::is_cuid2), None))
    }

    pub fn ulid(&self) -> Self {
        self.with_check(Check::format("ulid", Arc::new(format::is_ulid), None))
    }

    pub fn ipv4(&self) -> Self {
        self.with_check(Check::format("ipv4", Arc::new(format::is_ipv4), None))
    }

    pub fn ipv6(&self) -> Self {
        self.with_check(Check::format("ipv6", Arc::new(format::is_ipv6), None))
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.with_check(Check::format(
            "prefix",
            Arc::new(move |s: &str| s.starts_with(&prefix)),
            None,
        ))
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.with_check(Check::format(
            "suffix",
            Arc::new(move |s: &str| s.ends_with(&suffix)),
            None,
        ))
    }

    pub fn includes(&self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        self.with_check(Check::format(
            "substring",
            Arc::new(move |s: &str| s.contains(&needle)),
            None,
        ))
    }

    /// Overwrite: trims surrounding whitespace before later checks run.
    pub fn trim(&self) -> Self {
        self.overwrite(|value| match value {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other,
        })
    }

    /// Overwrite: lowercases before later checks run.
    pub fn to_lowercase(&self) -> Self {
        self.overwrite(|value| match value {
            Value::String(s) => Value::String(s.to_lowercase()),
            other => other,
        })
    }

    /// Overwrite: uppercases before later checks run.
    pub fn to_uppercase(&self) -> Self {
        self.overwrite(|value| match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueCode;

    #[test]
    fn test_round_trip() {
        assert_eq!(string().parse("hi").unwrap(), "hi");
    }

    #[test]
    fn test_rejects_other_kinds() {
        let error = string().parse(12i64).unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::InvalidType);
        assert_eq!(error.issues()[0].message, "expected string, but got int");
    }

    #[test]
    fn test_min_counts_chars() {
        let schema = string().min(3);
        assert!(schema.parse("héé").is_ok());
        let error = schema.parse("hé").unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_trim_before_min_is_order_sensitive() {
        let trimmed_first = string().trim().min(3);
        assert!(trimmed_first.parse("  hi ").is_err());
        assert_eq!(trimmed_first.parse(" hey ").unwrap(), "hey");

        let min_first = string().min(3).trim();
        assert_eq!(min_first.parse("  hi ").unwrap(), "hi");
    }

    #[test]
    fn test_email_format() {
        let schema = string().email();
        assert!(schema.parse("user@example.com").is_ok());
        let error = schema.parse("nope").unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::InvalidFormat);
        assert_eq!(error.issues()[0].message, "invalid email");
    }

    #[test]
    fn test_regex_unanchored() {
        let schema = string().regex(Regex::new("^[a-z]+$").unwrap());
        assert!(schema.parse("abc").is_ok());
        assert!(schema.parse("abc1").is_err());
    }

    #[test]
    fn test_modifiers_do_not_mutate_originals() {
        let base = string();
        let _stricter = base.min(5);
        assert!(base.parse("ok").is_ok());
    }

    #[test]
    fn test_custom_error_message() {
        let schema = string().error("expected a name, not {received}");
        let error = schema.parse(1i64).unwrap_err();
        assert_eq!(error.issues()[0].message, "expected a name, not int");
    }
}
