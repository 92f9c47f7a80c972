//! Issue model and error aggregation.
//!
//! Failures are recorded as [`RawIssue`]s while a parse is in flight: the
//! code, the offending input, the path to it, and a property record. Raw
//! issues become resolved [`Issue`]s when the parse finishes, at which point
//! the message is rendered with this precedence (first non-empty wins):
//! issue-local override, check-local error, schema-local override,
//! context-level override, built-in default.

use core::fmt;

use thiserror::Error;
use veris_value::{Value, ValuePath};

use crate::driver::ParseContext;

/// Stable machine-readable failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    InvalidType,
    InvalidValue,
    TooSmall,
    TooBig,
    NotMultipleOf,
    InvalidFormat,
    InvalidUnion,
    InvalidUnionDiscriminator,
    InvalidIntersectionTypes,
    InvalidKey,
    UnrecognizedKeys,
    NotUnique,
    Custom,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::InvalidValue => "invalid_value",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::NotMultipleOf => "not_multiple_of",
            IssueCode::InvalidFormat => "invalid_format",
            IssueCode::InvalidUnion => "invalid_union",
            IssueCode::InvalidUnionDiscriminator => "invalid_union_discriminator",
            IssueCode::InvalidIntersectionTypes => "invalid_intersection_types",
            IssueCode::InvalidKey => "invalid_key",
            IssueCode::UnrecognizedKeys => "unrecognized_keys",
            IssueCode::NotUnique => "not_unique",
            IssueCode::Custom => "custom",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured attributes attached to an issue.
#[derive(Debug, Clone, Default)]
pub struct IssueProps {
    pub expected: Option<String>,
    pub received: Option<String>,
    pub minimum: Option<Value>,
    pub maximum: Option<Value>,
    pub inclusive: Option<bool>,
    pub origin: Option<&'static str>,
    pub divisor: Option<Value>,
    pub format: Option<&'static str>,
    pub keys: Vec<String>,
    pub union_errors: Vec<ParseError>,
}

/// An unresolved failure: message not yet rendered.
#[derive(Debug, Clone)]
pub struct RawIssue {
    pub code: IssueCode,
    /// Message template chosen by the issue, check or owning schema.
    pub message: Option<String>,
    pub input: Value,
    pub path: ValuePath,
    pub props: IssueProps,
    /// Set once the owning schema has had its chance to override the
    /// message; enclosing schemas leave claimed issues alone.
    pub(crate) claimed: bool,
}

impl RawIssue {
    pub fn new(code: IssueCode, input: Value, path: ValuePath) -> Self {
        RawIssue {
            code,
            message: None,
            input,
            path,
            props: IssueProps::default(),
            claimed: false,
        }
    }
}

/// A finalized failure with a rendered message.
#[derive(Debug, Clone)]
pub struct Issue {
    pub code: IssueCode,
    pub path: ValuePath,
    pub message: String,
    pub input: Value,
    pub props: IssueProps,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The aggregate error surfaced by a failed parse.
#[derive(Debug, Clone, Error)]
#[error("{}", summarize(.issues))]
pub struct ParseError {
    issues: Vec<Issue>,
}

impl ParseError {
    pub fn new(issues: Vec<Issue>) -> Self {
        ParseError { issues }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

fn summarize(issues: &[Issue]) -> String {
    let mut out = format!("validation failed with {} issue(s)", issues.len());
    for issue in issues {
        out.push_str("\n  - ");
        out.push_str(&issue.to_string());
    }
    out
}

/// Resolve every raw issue's message and assemble the aggregate error.
pub(crate) fn finalize(raw: Vec<RawIssue>, ctx: &ParseContext) -> ParseError {
    ParseError {
        issues: raw.into_iter().map(|issue| resolve(issue, ctx)).collect(),
    }
}

fn resolve(raw: RawIssue, ctx: &ParseContext) -> Issue {
    let message = match &raw.message {
        Some(template) => render_template(template, &raw),
        None => match &ctx.error {
            Some(over) => render_template(&over.resolve(&raw), &raw),
            None => default_message(&raw),
        },
    };
    Issue {
        code: raw.code,
        path: raw.path,
        message,
        input: raw.input,
        props: raw.props,
    }
}

/// Substitute `{expected}`-style placeholders with issue properties.
pub(crate) fn render_template(template: &str, raw: &RawIssue) -> String {
    if !template.contains('{') {
        return template.to_string();
    }
    let mut out = template.to_string();
    let substitutions: [(&str, String); 6] = [
        ("{expected}", raw.props.expected.clone().unwrap_or_default()),
        ("{received}", raw.props.received.clone().unwrap_or_default()),
        (
            "{minimum}",
            raw.props.minimum.as_ref().map(value_display).unwrap_or_default(),
        ),
        (
            "{maximum}",
            raw.props.maximum.as_ref().map(value_display).unwrap_or_default(),
        ),
        (
            "{inclusive}",
            raw.props
                .inclusive
                .map(|i| i.to_string())
                .unwrap_or_default(),
        ),
        ("{origin}", raw.props.origin.unwrap_or_default().to_string()),
    ];
    for (placeholder, replacement) in substitutions {
        if out.contains(placeholder) {
            out = out.replace(placeholder, &replacement);
        }
    }
    out
}

/// Compact rendering of a value for use inside messages.
fn value_display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::I64(i) => i.to_string(),
        Value::U64(u) => u.to_string(),
        Value::F32(f) => f.to_string(),
        Value::F64(f) => f.to_string(),
        Value::BigInt(b) => b.to_string(),
        Value::Complex(c) => c.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::DateTime(dt) => dt.to_rfc3339(),
        other => other.kind().name().to_string(),
    }
}

fn default_message(raw: &RawIssue) -> String {
    match raw.code {
        IssueCode::InvalidType => match (&raw.props.expected, &raw.props.received) {
            (Some(expected), Some(received)) => {
                format!("expected {expected}, but got {received}")
            }
            (Some(expected), None) => format!("expected {expected}"),
            _ => "invalid type".to_string(),
        },
        IssueCode::InvalidValue => match &raw.props.expected {
            Some(expected) => format!("invalid value: expected {expected}"),
            None => "invalid value".to_string(),
        },
        IssueCode::TooSmall => bound_message(raw, Bound::Lower),
        IssueCode::TooBig => bound_message(raw, Bound::Upper),
        IssueCode::NotMultipleOf => match &raw.props.divisor {
            Some(divisor) => format!("must be a multiple of {}", value_display(divisor)),
            None => "not a multiple of the required step".to_string(),
        },
        IssueCode::InvalidFormat => match raw.props.format {
            Some(format) => format!("invalid {format}"),
            None => "invalid format".to_string(),
        },
        IssueCode::InvalidUnion => "no union member matched the input".to_string(),
        IssueCode::InvalidUnionDiscriminator => match &raw.props.expected {
            Some(expected) => {
                format!("invalid discriminator value: expected one of {expected}")
            }
            None => "invalid discriminator value".to_string(),
        },
        IssueCode::InvalidIntersectionTypes => {
            "intersection branches produced conflicting values".to_string()
        }
        IssueCode::InvalidKey => "invalid key in map".to_string(),
        IssueCode::UnrecognizedKeys => {
            format!("unrecognized key(s): {}", raw.props.keys.join(", "))
        }
        IssueCode::NotUnique => "elements must be unique".to_string(),
        IssueCode::Custom => "invalid input".to_string(),
    }
}

enum Bound {
    Lower,
    Upper,
}

fn bound_message(raw: &RawIssue, bound: Bound) -> String {
    let limit = match bound {
        Bound::Lower => raw.props.minimum.as_ref(),
        Bound::Upper => raw.props.maximum.as_ref(),
    };
    let limit = limit.map(value_display).unwrap_or_default();
    let inclusive = raw.props.inclusive.unwrap_or(true);
    match raw.props.origin {
        Some("string") => match (bound, inclusive) {
            (Bound::Lower, true) => format!("must be at least {limit} characters long"),
            (Bound::Lower, false) => format!("must be longer than {limit} characters"),
            (Bound::Upper, true) => format!("must be at most {limit} characters long"),
            (Bound::Upper, false) => format!("must be shorter than {limit} characters"),
        },
        Some("array") | Some("set") | Some("map") => match (bound, inclusive) {
            (Bound::Lower, true) => format!("must contain at least {limit} elements"),
            (Bound::Lower, false) => format!("must contain more than {limit} elements"),
            (Bound::Upper, true) => format!("must contain at most {limit} elements"),
            (Bound::Upper, false) => format!("must contain fewer than {limit} elements"),
        },
        _ => match (bound, inclusive) {
            (Bound::Lower, true) => format!("must be greater than or equal to {limit}"),
            (Bound::Lower, false) => format!("must be greater than {limit}"),
            (Bound::Upper, true) => format!("must be less than or equal to {limit}"),
            (Bound::Upper, false) => format!("must be less than {limit}"),
        },
    }
}
