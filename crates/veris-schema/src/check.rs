//! The check framework.
//!
//! A check is a kind code plus a closure run against the in-flight
//! [`ParsePayload`]. Checks execute in registration order; a check either
//! records issues or, for overwrite checks, replaces the payload value and
//! never reports. Later checks observe earlier replacements.

use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::Zero;

use veris_value::Value;

use crate::driver::ParsePayload;
use crate::issue::IssueCode;

/// Taxonomy of built-in check families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    MinSize,
    MaxSize,
    Size,
    Gt,
    Gte,
    Lt,
    Lte,
    MultipleOf,
    Format,
    Custom,
    Overwrite,
}

type CheckFn = Arc<dyn Fn(&mut ParsePayload) + Send + Sync>;

#[derive(Clone)]
pub struct Check {
    pub kind: CheckKind,
    run: CheckFn,
}

impl Check {
    pub(crate) fn new(kind: CheckKind, run: CheckFn) -> Self {
        Check { kind, run }
    }

    pub(crate) fn run(&self, payload: &mut ParsePayload) {
        (self.run)(payload);
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check({:?})", self.kind)
    }
}

/// Mutable view handed to custom multi-issue checks and transforms.
pub struct RefineCtx<'a> {
    payload: &'a mut ParsePayload,
}

impl<'a> RefineCtx<'a> {
    pub(crate) fn new(payload: &'a mut ParsePayload) -> Self {
        RefineCtx { payload }
    }

    /// The value currently flowing through the pipeline.
    pub fn value(&self) -> &Value {
        &self.payload.value
    }

    /// Record a `custom` issue at the current path.
    pub fn add_issue(&mut self, message: impl Into<String>) {
        self.add_issue_with_code(IssueCode::Custom, message);
    }

    /// Record an issue with an explicit code at the current path.
    pub fn add_issue_with_code(&mut self, code: IssueCode, message: impl Into<String>) {
        let mut raw = self.payload.raw_issue(code);
        raw.message = Some(message.into());
        self.payload.push_issue(raw);
    }
}

/// Measure a value for size checks, with the origin name used in issues.
pub(crate) fn size_of(value: &Value) -> Option<(usize, &'static str)> {
    match value {
        Value::String(s) => Some((s.chars().count(), "string")),
        Value::Array(items) => Some((items.0.len(), "array")),
        Value::Set(set) => Some((set.len(), "set")),
        Value::Map(map) => Some((map.len(), "map")),
        _ => None,
    }
}

/// Order two values when both sit on a comparable axis.
pub(crate) fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::BigInt(a), Value::BigInt(b)) => Some(a.cmp(b)),
        (Value::BigInt(a), _) => right.as_i128().map(|b| a.cmp(&BigInt::from(b))),
        (_, Value::BigInt(b)) => left.as_i128().map(|a| BigInt::from(a).cmp(b)),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        (Value::I64(_) | Value::U64(_), Value::I64(_) | Value::U64(_)) => {
            left.as_i128().zip(right.as_i128()).map(|(a, b)| a.cmp(&b))
        }
        _ => left
            .as_f64()
            .zip(right.as_f64())
            .and_then(|(a, b)| a.partial_cmp(&b)),
    }
}

fn is_multiple_of(value: &Value, divisor: &Value) -> bool {
    match (value, divisor) {
        (Value::BigInt(a), _) => {
            let b = match divisor {
                Value::BigInt(b) => b.clone(),
                _ => match divisor.as_i128() {
                    Some(b) => BigInt::from(b),
                    None => return false,
                },
            };
            !b.is_zero() && (a % &b).is_zero()
        }
        (Value::I64(_) | Value::U64(_), Value::I64(_) | Value::U64(_)) => {
            match (value.as_i128(), divisor.as_i128()) {
                (Some(a), Some(b)) if b != 0 => a % b == 0,
                _ => false,
            }
        }
        _ => match (value.as_f64(), divisor.as_f64()) {
            (Some(a), Some(b)) if b != 0.0 => (a % b) == 0.0,
            _ => false,
        },
    }
}

impl Check {
    pub(crate) fn min_size(minimum: usize, error: Option<String>) -> Check {
        Check::new(
            CheckKind::MinSize,
            Arc::new(move |payload| {
                let Some((size, origin)) = size_of(&payload.value) else {
                    return;
                };
                if size < minimum {
                    let mut raw = payload.raw_issue(IssueCode::TooSmall);
                    raw.message = error.clone();
                    raw.props.minimum = Some(Value::U64(minimum as u64));
                    raw.props.inclusive = Some(true);
                    raw.props.origin = Some(origin);
                    payload.push_issue(raw);
                }
            }),
        )
    }

    pub(crate) fn max_size(maximum: usize, error: Option<String>) -> Check {
        Check::new(
            CheckKind::MaxSize,
            Arc::new(move |payload| {
                let Some((size, origin)) = size_of(&payload.value) else {
                    return;
                };
                if size > maximum {
                    let mut raw = payload.raw_issue(IssueCode::TooBig);
                    raw.message = error.clone();
                    raw.props.maximum = Some(Value::U64(maximum as u64));
                    raw.props.inclusive = Some(true);
                    raw.props.origin = Some(origin);
                    payload.push_issue(raw);
                }
            }),
        )
    }

    pub(crate) fn exact_size(expected: usize, error: Option<String>) -> Check {
        Check::new(
            CheckKind::Size,
            Arc::new(move |payload| {
                let Some((size, origin)) = size_of(&payload.value) else {
                    return;
                };
                if size == expected {
                    return;
                }
                let code = if size < expected {
                    IssueCode::TooSmall
                } else {
                    IssueCode::TooBig
                };
                let mut raw = payload.raw_issue(code);
                raw.message = error.clone();
                raw.props.minimum = Some(Value::U64(expected as u64));
                raw.props.maximum = Some(Value::U64(expected as u64));
                raw.props.inclusive = Some(true);
                raw.props.origin = Some(origin);
                payload.push_issue(raw);
            }),
        )
    }

    fn bound(
        kind: CheckKind,
        bound: Value,
        origin: &'static str,
        error: Option<String>,
    ) -> Check {
        Check::new(
            kind,
            Arc::new(move |payload| {
                let ord = compare_values(&payload.value, &bound);
                let ok = match kind {
                    CheckKind::Gt => ord == Some(Ordering::Greater),
                    CheckKind::Gte => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
                    CheckKind::Lt => ord == Some(Ordering::Less),
                    CheckKind::Lte => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
                    _ => true,
                };
                if ok {
                    return;
                }
                let (code, inclusive) = match kind {
                    CheckKind::Gt => (IssueCode::TooSmall, false),
                    CheckKind::Gte => (IssueCode::TooSmall, true),
                    CheckKind::Lt => (IssueCode::TooBig, false),
                    _ => (IssueCode::TooBig, true),
                };
                let mut raw = payload.raw_issue(code);
                raw.message = error.clone();
                if code == IssueCode::TooSmall {
                    raw.props.minimum = Some(bound.clone());
                } else {
                    raw.props.maximum = Some(bound.clone());
                }
                raw.props.inclusive = Some(inclusive);
                raw.props.origin = Some(origin);
                payload.push_issue(raw);
            }),
        )
    }

    pub(crate) fn gt(bound: Value, origin: &'static str, error: Option<String>) -> Check {
        Check::bound(CheckKind::Gt, bound, origin, error)
    }

    pub(crate) fn gte(bound: Value, origin: &'static str, error: Option<String>) -> Check {
        Check::bound(CheckKind::Gte, bound, origin, error)
    }

    pub(crate) fn lt(bound: Value, origin: &'static str, error: Option<String>) -> Check {
        Check::bound(CheckKind::Lt, bound, origin, error)
    }

    pub(crate) fn lte(bound: Value, origin: &'static str, error: Option<String>) -> Check {
        Check::bound(CheckKind::Lte, bound, origin, error)
    }

    pub(crate) fn multiple_of(divisor: Value, error: Option<String>) -> Check {
        Check::new(
            CheckKind::MultipleOf,
            Arc::new(move |payload| {
                if !is_multiple_of(&payload.value, &divisor) {
                    let mut raw = payload.raw_issue(IssueCode::NotMultipleOf);
                    raw.message = error.clone();
                    raw.props.divisor = Some(divisor.clone());
                    payload.push_issue(raw);
                }
            }),
        )
    }

    /// Format checks run against string payloads only.
    pub(crate) fn format(
        name: &'static str,
        predicate: Arc<dyn Fn(&str) -> bool + Send + Sync>,
        error: Option<String>,
    ) -> Check {
        Check::new(
            CheckKind::Format,
            Arc::new(move |payload| {
                let Value::String(s) = &payload.value else {
                    return;
                };
                if !predicate(s) {
                    let mut raw = payload.raw_issue(IssueCode::InvalidFormat);
                    raw.message = error.clone();
                    raw.props.format = Some(name);
                    payload.push_issue(raw);
                }
            }),
        )
    }

    pub(crate) fn custom(
        predicate: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
        error: Option<String>,
    ) -> Check {
        Check::new(
            CheckKind::Custom,
            Arc::new(move |payload| {
                if !predicate(&payload.value) {
                    let mut raw = payload.raw_issue(IssueCode::Custom);
                    raw.message = error.clone();
                    payload.push_issue(raw);
                }
            }),
        )
    }

    /// Custom check that may push any number of issues through [`RefineCtx`].
    pub(crate) fn custom_with(func: Arc<dyn Fn(&mut RefineCtx) + Send + Sync>) -> Check {
        Check::new(
            CheckKind::Custom,
            Arc::new(move |payload| {
                let mut ctx = RefineCtx::new(payload);
                func(&mut ctx);
            }),
        )
    }

    /// Unconditionally replace the payload value. Never reports issues.
    pub(crate) fn overwrite(func: Arc<dyn Fn(Value) -> Value + Send + Sync>) -> Check {
        Check::new(
            CheckKind::Overwrite,
            Arc::new(move |payload| {
                let current = payload.take_value();
                payload.value = func(current);
            }),
        )
    }
}
