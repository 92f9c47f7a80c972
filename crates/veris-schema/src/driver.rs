//! The parse driver.
//!
//! # Architecture
//!
//! - [`ParsePayload`]: mutable working record carried through one parse
//!   (current value, accumulated raw issues, path stack)
//! - [`ParseContext`]: immutable caller-supplied options
//! - [`drive`]: walks a value through one node; composites recurse with the
//!   shared payload, pushing a path segment before and popping it after
//!
//! The pipeline for one node: absence gate (default / optional / prefault),
//! opt-in coercion, type probe, child recursion for composites, then the
//! node's checks in registration order. All issues accumulate unless the
//! context or the schema requests abort-early.

use indexmap::{IndexMap, IndexSet};
use veris_value::{Array, KeyValue, Map, PathSegment, Set, Value, ValuePath};

use crate::check::RefineCtx;
use crate::coerce;
use crate::internals::ErrorOverride;
use crate::issue::{IssueCode, ParseError, RawIssue, finalize};
use crate::node::{Def, FloatWidth, SchemaNode, UnionDef};

/// Mutable state threaded through a single parse call.
pub struct ParsePayload {
    pub value: Value,
    pub(crate) issues: Vec<RawIssue>,
    pub(crate) path: ValuePath,
}

impl ParsePayload {
    pub(crate) fn new(value: Value, path: ValuePath) -> Self {
        ParsePayload {
            value,
            issues: Vec::new(),
            path,
        }
    }

    /// A sibling payload for trial validation (union members, record keys).
    pub(crate) fn fork(&self, value: Value) -> ParsePayload {
        ParsePayload::new(value, self.path.clone())
    }

    /// Move the current value out, leaving null behind.
    pub(crate) fn take_value(&mut self) -> Value {
        std::mem::replace(&mut self.value, Value::Null)
    }

    /// A raw issue seeded with the current value and path.
    pub(crate) fn raw_issue(&self, code: IssueCode) -> RawIssue {
        RawIssue::new(code, self.value.clone(), self.path.clone())
    }

    pub(crate) fn push_issue(&mut self, raw: RawIssue) {
        self.issues.push(raw);
    }

    fn push_invalid_type(&mut self, expected: &str, received: &str) {
        let mut raw = self.raw_issue(IssueCode::InvalidType);
        raw.props.expected = Some(expected.to_string());
        raw.props.received = Some(received.to_string());
        self.issues.push(raw);
    }

    /// Type mismatch against the node's own kind name.
    fn fail_probe(&mut self, node: &SchemaNode) {
        let received = self.value.kind().name();
        self.push_invalid_type(node.internals.type_code.name(), received);
    }
}

/// Immutable caller-supplied parse options.
#[derive(Clone, Default)]
pub struct ParseContext {
    /// Stop at the first issue instead of collecting all of them.
    pub abort_early: bool,
    /// Fallback message override consulted after schema-local overrides.
    pub error: Option<ErrorOverride>,
    /// Prefix for every issue path, when parsing a known sub-location.
    pub path_prefix: Option<ValuePath>,
}

/// Top-level entry: drive `input` through `node` and finalize the outcome.
pub(crate) fn parse_node(
    node: &SchemaNode,
    input: Value,
    ctx: &ParseContext,
) -> Result<Value, ParseError> {
    let base_path = ctx
        .path_prefix
        .clone()
        .or_else(|| node.internals.bag.path_prefix.clone())
        .unwrap_or_default();
    let mut payload = ParsePayload::new(input, base_path);
    drive(node, &mut payload, ctx);
    if payload.issues.is_empty() {
        Ok(payload.value)
    } else {
        Err(finalize(payload.issues, ctx))
    }
}

/// Drive the payload through one node, then let the node claim (and
/// possibly re-message) the issues it produced itself. Issues claimed by
/// child schemas are left untouched, so the nearest enclosing schema wins.
pub(crate) fn drive(node: &SchemaNode, payload: &mut ParsePayload, ctx: &ParseContext) {
    let start = payload.issues.len();
    drive_inner(node, payload, ctx);
    for raw in &mut payload.issues[start..] {
        if raw.claimed {
            continue;
        }
        if raw.message.is_none()
            && let Some(over) = &node.internals.error_override
        {
            let message = over.resolve(raw);
            raw.message = Some(message);
        }
        raw.claimed = true;
    }
}

fn drive_inner(node: &SchemaNode, payload: &mut ParsePayload, ctx: &ParseContext) {
    let start = payload.issues.len();
    let abort = ctx.abort_early || node.internals.bag.abort;
    let flags = node.internals.flags;

    // Absence gate.
    if payload.value.is_null() {
        if let Some(source) = &node.internals.default {
            // Default bypasses the current schema's own validation.
            payload.value = source.produce();
            return;
        }
        if flags.non_optional || flags.exact_optional {
            payload.fail_probe(node);
            return;
        }
        if flags.optional || flags.nilable {
            return;
        }
        if !node.consumes_null() {
            match &node.internals.prefault {
                // Prefault re-enters the pipeline and is validated in full.
                Some(source) => payload.value = source.produce(),
                None => {
                    payload.fail_probe(node);
                    return;
                }
            }
        }
    }

    // Opt-in coercion.
    if flags.coerce && coerce::coercible(node.internals.type_code) && !payload.value.is_null() {
        match coerce::coerce_to(node.internals.type_code, &payload.value) {
            Some(coerced) => payload.value = coerced,
            None => {
                payload.fail_probe(node);
                return;
            }
        }
    }

    // Type probe and, for composites, child recursion.
    match &node.def {
        Def::String => {
            if !matches!(payload.value, Value::String(_)) {
                payload.fail_probe(node);
                return;
            }
        }
        Def::Bool => {
            if !matches!(payload.value, Value::Bool(_)) {
                payload.fail_probe(node);
                return;
            }
        }
        Def::BigInt => {
            if !matches!(payload.value, Value::BigInt(_)) {
                payload.fail_probe(node);
                return;
            }
        }
        Def::Complex => {
            if !matches!(payload.value, Value::Complex(_)) {
                payload.fail_probe(node);
                return;
            }
        }
        Def::DateTime => {
            if !matches!(payload.value, Value::DateTime(_)) {
                payload.fail_probe(node);
                return;
            }
        }
        Def::Null => {
            if !payload.value.is_null() {
                payload.fail_probe(node);
                return;
            }
        }
        Def::Any | Def::Unknown => {}
        Def::Int(int_def) => {
            let Some(wide) = payload.value.as_i128() else {
                payload.fail_probe(node);
                return;
            };
            if wide < int_def.min || wide > int_def.max {
                let out_of_low = wide < int_def.min;
                let code = if out_of_low {
                    IssueCode::TooSmall
                } else {
                    IssueCode::TooBig
                };
                let mut raw = payload.raw_issue(code);
                if out_of_low {
                    raw.props.minimum = Some(int_bound(int_def.min));
                } else {
                    raw.props.maximum = Some(int_bound(int_def.max));
                }
                raw.props.inclusive = Some(true);
                raw.props.origin = Some("int");
                payload.push_issue(raw);
                return;
            }
        }
        Def::Float(_) => {
            if !matches!(payload.value, Value::F32(_) | Value::F64(_)) {
                payload.fail_probe(node);
                return;
            }
            if float_width(node) == FloatWidth::W32
                && let Value::F64(f) = payload.value
            {
                payload.value = Value::F32(f as f32);
            }
        }
        Def::Literal(options) => {
            let matched = payload
                .value
                .as_key()
                .is_some_and(|key| options.contains(&key));
            if !matched {
                let mut raw = payload.raw_issue(IssueCode::InvalidValue);
                raw.props.expected = Some(join_options(options));
                raw.props.received = Some(payload.value.kind().name().to_string());
                payload.push_issue(raw);
                return;
            }
        }
        Def::Enum(enum_def) => {
            let matched = payload
                .value
                .as_key()
                .is_some_and(|key| enum_def.entries.values().any(|v| *v == key));
            if !matched {
                let options: Vec<KeyValue> = enum_def.entries.values().cloned().collect();
                let mut raw = payload.raw_issue(IssueCode::InvalidValue);
                raw.props.expected = Some(join_options(&options));
                raw.props.received = Some(payload.value.kind().name().to_string());
                payload.push_issue(raw);
                return;
            }
        }
        Def::Function(_) => {
            // There is no callable value; function schemas are enforced
            // through their `implement` wrapper.
            payload.fail_probe(node);
            return;
        }
        Def::Array(element) => {
            if !matches!(payload.value, Value::Array(_)) {
                payload.fail_probe(node);
                return;
            }
            let items = match payload.take_value() {
                Value::Array(Array(items)) => items,
                other => {
                    payload.value = other;
                    payload.fail_probe(node);
                    return;
                }
            };
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                payload.path.push(PathSegment::Index(index));
                payload.value = item;
                drive(element, payload, ctx);
                payload.path.pop();
                out.push(payload.take_value());
                if abort && payload.issues.len() > start {
                    break;
                }
            }
            payload.value = Value::Array(Array(out));
        }
        Def::Tuple(tuple_def) => {
            drive_tuple(tuple_def, node, payload, ctx, abort, start);
            if payload.issues.len() > start && abort {
                return;
            }
        }
        Def::Object(object_def) => {
            drive_object(object_def, node, payload, ctx, abort, start);
            if payload.issues.len() > start && abort {
                return;
            }
        }
        Def::Record(record_def) => {
            drive_record(record_def, node, payload, ctx, abort, start);
            if payload.issues.len() > start && abort {
                return;
            }
        }
        Def::Set(element) => {
            drive_set(element, node, payload, ctx, abort, start);
            if payload.issues.len() > start && abort {
                return;
            }
        }
        Def::Union(union_def) => {
            drive_union(union_def, payload, ctx);
            if payload.issues.len() > start {
                return;
            }
        }
        Def::Intersection(left, right) => {
            drive_intersection(left, right, payload, ctx);
            if payload.issues.len() > start {
                return;
            }
        }
        Def::Lazy(lazy) => {
            drive(lazy.resolve(), payload, ctx);
            if payload.issues.len() > start {
                return;
            }
        }
        Def::Pipe(input_stage, output_stage) => {
            drive(input_stage, payload, ctx);
            if payload.issues.len() > start {
                return;
            }
            // A null from the first stage short-circuits the second.
            if payload.value.is_null() {
                return;
            }
            drive(output_stage, payload, ctx);
            if payload.issues.len() > start {
                return;
            }
        }
        Def::Transform(func) => {
            let input = payload.take_value();
            let mut refine = RefineCtx::new(payload);
            let output = func(input, &mut refine);
            payload.value = output;
            if payload.issues.len() > start {
                return;
            }
        }
    }

    if abort && payload.issues.len() > start {
        return;
    }

    // Checks, in registration order.
    for check in &node.internals.checks {
        let before = payload.issues.len();
        check.run(payload);
        if abort && payload.issues.len() > before {
            return;
        }
    }
}

fn float_width(node: &SchemaNode) -> FloatWidth {
    match node.def {
        Def::Float(width) => width,
        _ => FloatWidth::W64,
    }
}

fn int_bound(bound: i128) -> Value {
    if let Ok(i) = i64::try_from(bound) {
        Value::I64(i)
    } else {
        Value::U64(bound as u64)
    }
}

fn join_options(options: &[KeyValue]) -> String {
    options
        .iter()
        .map(|option| option.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn segment_for_key(key: &KeyValue) -> PathSegment {
    match key {
        KeyValue::String(s) => PathSegment::Key(s.clone()),
        other => PathSegment::Value(other.clone()),
    }
}

fn drive_tuple(
    tuple_def: &crate::node::TupleDef,
    node: &SchemaNode,
    payload: &mut ParsePayload,
    ctx: &ParseContext,
    abort: bool,
    start: usize,
) {
    let length = match &payload.value {
        Value::Array(Array(items)) => items.len(),
        _ => {
            payload.fail_probe(node);
            return;
        }
    };

    let fixed = &tuple_def.items;
    let required = fixed
        .iter()
        .rposition(|item| {
            !(item.absent_ok()
                || item.internals.default.is_some()
                || item.internals.prefault.is_some())
        })
        .map_or(0, |index| index + 1);

    if length < required {
        let mut raw = payload.raw_issue(IssueCode::TooSmall);
        raw.props.minimum = Some(Value::U64(required as u64));
        raw.props.inclusive = Some(true);
        raw.props.origin = Some("array");
        payload.push_issue(raw);
        return;
    }
    if tuple_def.rest.is_none() && length > fixed.len() {
        let mut raw = payload.raw_issue(IssueCode::TooBig);
        raw.props.maximum = Some(Value::U64(fixed.len() as u64));
        raw.props.inclusive = Some(true);
        raw.props.origin = Some("array");
        payload.push_issue(raw);
        return;
    }

    let items = match payload.take_value() {
        Value::Array(Array(items)) => items,
        other => {
            payload.value = other;
            payload.fail_probe(node);
            return;
        }
    };

    let mut out = Vec::with_capacity(items.len());
    let present = items.len();
    for (index, item) in items.into_iter().enumerate() {
        let target = match fixed.get(index) {
            Some(item_schema) => item_schema,
            None => match &tuple_def.rest {
                Some(rest) => rest.as_ref(),
                // Unreachable in practice: guarded by the length bound.
                None => break,
            },
        };
        payload.path.push(PathSegment::Index(index));
        payload.value = item;
        drive(target, payload, ctx);
        payload.path.pop();
        out.push(payload.take_value());
        if abort && payload.issues.len() > start {
            break;
        }
    }

    // Contiguous trailing defaults fill in for absent elements.
    for item_schema in fixed.iter().skip(present) {
        if item_schema.internals.default.is_none() && item_schema.internals.prefault.is_none() {
            break;
        }
        payload.path.push(PathSegment::Index(out.len()));
        payload.value = Value::Null;
        drive(item_schema, payload, ctx);
        payload.path.pop();
        out.push(payload.take_value());
    }

    payload.value = Value::Array(Array(out));
}

fn drive_object(
    object_def: &crate::node::ObjectDef,
    node: &SchemaNode,
    payload: &mut ParsePayload,
    ctx: &ParseContext,
    abort: bool,
    start: usize,
) {
    if !matches!(payload.value, Value::Map(_)) {
        payload.fail_probe(node);
        return;
    }
    let mut input = match payload.take_value() {
        Value::Map(map) => map,
        other => {
            payload.value = other;
            payload.fail_probe(node);
            return;
        }
    };

    let mut out: IndexMap<KeyValue, Value> = IndexMap::with_capacity(object_def.shape.len());
    for (key, child) in &object_def.shape {
        let key_value = KeyValue::String(key.clone());
        let present = input.0.shift_remove(&key_value);
        payload.path.push(PathSegment::Key(key.clone()));
        match present {
            Some(value) => {
                payload.value = value;
                drive(child, payload, ctx);
                out.insert(key_value, payload.take_value());
            }
            None => {
                let child_internals = &child.internals;
                if child_internals.default.is_some() || child_internals.prefault.is_some() {
                    payload.value = Value::Null;
                    drive(child, payload, ctx);
                    out.insert(key_value, payload.take_value());
                } else if child.absent_ok() {
                    // Key omitted from the output entirely.
                } else if child_internals.flags.nilable {
                    // Nilable requires the key to be present with an
                    // explicit null; absence is not the same thing.
                    let mut raw = payload.raw_issue(IssueCode::InvalidType);
                    raw.props.expected = Some(child_internals.type_code.name().to_string());
                    raw.props.received = Some("missing".to_string());
                    payload.push_issue(raw);
                } else {
                    payload.value = Value::Null;
                    let before = payload.issues.len();
                    drive(child, payload, ctx);
                    if payload.issues.len() == before {
                        out.insert(key_value, payload.take_value());
                    }
                }
            }
        }
        payload.path.pop();
        if abort && payload.issues.len() > start {
            payload.value = Value::Map(Map(out));
            return;
        }
    }

    if let Some(catchall) = &object_def.catchall {
        for (key, value) in std::mem::take(&mut input.0) {
            payload.path.push(segment_for_key(&key));
            payload.value = value;
            drive(catchall, payload, ctx);
            payload.path.pop();
            out.insert(key, payload.take_value());
            if abort && payload.issues.len() > start {
                break;
            }
        }
    } else {
        match object_def.mode {
            crate::node::UnknownKeys::Strip => {}
            crate::node::UnknownKeys::Passthrough => {
                for (key, value) in std::mem::take(&mut input.0) {
                    out.insert(key, value);
                }
            }
            crate::node::UnknownKeys::Strict => {
                if !input.0.is_empty() {
                    let mut raw = payload.raw_issue(IssueCode::UnrecognizedKeys);
                    raw.props.keys = input.0.keys().map(|key| key.to_string()).collect();
                    payload.push_issue(raw);
                }
            }
        }
    }

    payload.value = Value::Map(Map(out));
}

fn drive_record(
    record_def: &crate::node::RecordDef,
    node: &SchemaNode,
    payload: &mut ParsePayload,
    ctx: &ParseContext,
    abort: bool,
    start: usize,
) {
    if !matches!(payload.value, Value::Map(_)) {
        payload.fail_probe(node);
        return;
    }
    let input = match payload.take_value() {
        Value::Map(map) => map,
        other => {
            payload.value = other;
            payload.fail_probe(node);
            return;
        }
    };

    let mut out: IndexMap<KeyValue, Value> = IndexMap::with_capacity(input.len());
    for (key, value) in input.0 {
        payload.path.push(segment_for_key(&key));

        // Keys validate in a trial payload; their sub-issues collapse
        // into a single invalid_key at the entry's path.
        let mut key_trial = payload.fork(key.clone().into_value());
        drive(record_def.key.as_ref(), &mut key_trial, ctx);
        let normalized = if key_trial.issues.is_empty() {
            key_trial.value.as_key()
        } else {
            None
        };
        let Some(normalized) = normalized else {
            let raw = RawIssue::new(
                IssueCode::InvalidKey,
                key.clone().into_value(),
                payload.path.clone(),
            );
            payload.push_issue(raw);
            payload.path.pop();
            if abort && payload.issues.len() > start {
                break;
            }
            continue;
        };

        if out.contains_key(&normalized) {
            let raw = RawIssue::new(
                IssueCode::InvalidKey,
                normalized.clone().into_value(),
                payload.path.clone(),
            );
            payload.push_issue(raw);
            payload.path.pop();
            if abort && payload.issues.len() > start {
                break;
            }
            continue;
        }

        payload.value = value;
        drive(record_def.value.as_ref(), payload, ctx);
        out.insert(normalized, payload.take_value());
        payload.path.pop();
        if abort && payload.issues.len() > start {
            break;
        }
    }

    payload.value = Value::Map(Map(out));
}

fn drive_set(
    element: &SchemaNode,
    node: &SchemaNode,
    payload: &mut ParsePayload,
    ctx: &ParseContext,
    abort: bool,
    start: usize,
) {
    let items: Vec<Value> = match payload.take_value() {
        Value::Array(Array(items)) => items,
        Value::Set(set) => set.into_iter().map(KeyValue::into_value).collect(),
        other => {
            payload.value = other;
            payload.fail_probe(node);
            return;
        }
    };

    // Dedup on the fly; duplicated input elements are not an error.
    let mut uniques: Vec<(KeyValue, Value)> = Vec::with_capacity(items.len());
    let mut seen: IndexSet<KeyValue> = IndexSet::with_capacity(items.len());
    for item in items {
        match item.as_key() {
            Some(key) => {
                if seen.insert(key.clone()) {
                    uniques.push((key, item));
                }
            }
            None => {
                let mut raw =
                    RawIssue::new(IssueCode::InvalidValue, item, payload.path.clone());
                raw.props.expected = Some("set element".to_string());
                payload.push_issue(raw);
                if abort {
                    payload.value = Value::Set(Set::default());
                    return;
                }
            }
        }
    }

    let mut out = Set::new();
    for (key, item) in uniques {
        payload.path.push(PathSegment::Value(key));
        let before = payload.issues.len();
        payload.value = item;
        drive(element, payload, ctx);
        let result = payload.take_value();
        if payload.issues.len() == before {
            match result.as_key() {
                Some(normalized) => {
                    // Overwrites may collapse two formerly-distinct
                    // elements; that collision is reportable.
                    if !out.insert(normalized) {
                        let raw = RawIssue::new(
                            IssueCode::NotUnique,
                            result,
                            payload.path.clone(),
                        );
                        payload.push_issue(raw);
                    }
                }
                None => {
                    let mut raw =
                        RawIssue::new(IssueCode::InvalidValue, result, payload.path.clone());
                    raw.props.expected = Some("set element".to_string());
                    payload.push_issue(raw);
                }
            }
        }
        payload.path.pop();
        if abort && payload.issues.len() > start {
            break;
        }
    }

    payload.value = Value::Set(out);
}

fn drive_union(union_def: &UnionDef, payload: &mut ParsePayload, ctx: &ParseContext) {
    if let Some(discriminator) = &union_def.discriminator {
        drive_discriminated(union_def, discriminator, payload, ctx);
        return;
    }

    // Ordered: first success wins, except that a success from a member
    // whose kind equals the input's kind is preferred. This keeps result
    // kinds stable when several members accept the same value.
    let mut first_success: Option<Value> = None;
    let mut failures: Vec<ParseError> = Vec::with_capacity(union_def.members.len());
    for member in &union_def.members {
        let input = payload.value.clone();
        let kind_exact = kind_matches(member, &input);
        let mut trial = payload.fork(input);
        drive(member, &mut trial, ctx);
        if trial.issues.is_empty() {
            if kind_exact {
                payload.value = trial.value;
                return;
            }
            if first_success.is_none() {
                first_success = Some(trial.value);
            }
        } else {
            failures.push(finalize(trial.issues, ctx));
        }
    }

    if let Some(value) = first_success {
        payload.value = value;
        return;
    }

    let mut raw = payload.raw_issue(IssueCode::InvalidUnion);
    raw.props.union_errors = failures;
    payload.push_issue(raw);
}

fn drive_discriminated(
    union_def: &UnionDef,
    discriminator: &crate::node::Discriminator,
    payload: &mut ParsePayload,
    ctx: &ParseContext,
) {
    let tag = match &payload.value {
        Value::Map(map) => map.get_str(&discriminator.key).and_then(Value::as_key),
        _ => {
            payload.fail_probe_expected("map");
            return;
        }
    };

    let member_index = tag.as_ref().and_then(|key| discriminator.table.get(key));
    let Some(&member_index) = member_index else {
        let mut allowed: Vec<KeyValue> = discriminator.table.keys().cloned().collect();
        allowed.sort();
        payload.path.push(PathSegment::Key(discriminator.key.clone()));
        let mut raw = payload.raw_issue(IssueCode::InvalidUnionDiscriminator);
        raw.input = tag.map(KeyValue::into_value).unwrap_or(Value::Null);
        raw.props.expected = Some(join_options(&allowed));
        payload.push_issue(raw);
        payload.path.pop();
        return;
    };

    drive(&union_def.members[member_index], payload, ctx);
}

impl ParsePayload {
    fn fail_probe_expected(&mut self, expected: &str) {
        let received = self.value.kind().name();
        self.push_invalid_type(expected, received);
    }
}

fn drive_intersection(
    left: &SchemaNode,
    right: &SchemaNode,
    payload: &mut ParsePayload,
    ctx: &ParseContext,
) {
    let input = payload.value.clone();
    let mut left_trial = payload.fork(input);
    drive(left, &mut left_trial, ctx);
    let rest = payload.take_value();
    let mut right_trial = payload.fork(rest);
    drive(right, &mut right_trial, ctx);

    if !left_trial.issues.is_empty() || !right_trial.issues.is_empty() {
        payload.issues.extend(left_trial.issues);
        payload.issues.extend(right_trial.issues);
        return;
    }

    match (left_trial.value, right_trial.value) {
        (Value::Map(mut left_map), Value::Map(right_map)) => {
            for (key, value) in right_map.0 {
                match left_map.0.get(&key) {
                    Some(existing) if *existing != value => {
                        payload.path.push(segment_for_key(&key));
                        let raw = RawIssue::new(
                            IssueCode::InvalidIntersectionTypes,
                            value,
                            payload.path.clone(),
                        );
                        payload.push_issue(raw);
                        payload.path.pop();
                    }
                    _ => {
                        left_map.0.insert(key, value);
                    }
                }
            }
            payload.value = Value::Map(left_map);
        }
        (left_value, right_value) => {
            if left_value == right_value {
                payload.value = left_value;
            } else {
                let raw = RawIssue::new(
                    IssueCode::InvalidIntersectionTypes,
                    right_value,
                    payload.path.clone(),
                );
                payload.push_issue(raw);
            }
        }
    }
}

/// Resolve wrappers down to the node whose kind is observable.
fn effective(node: &SchemaNode) -> &SchemaNode {
    match &node.def {
        Def::Lazy(lazy) => effective(lazy.resolve()),
        Def::Pipe(input_stage, _) => effective(input_stage),
        _ => node,
    }
}

/// Does this member's accepted kind equal the input's kind?
fn kind_matches(member: &SchemaNode, input: &Value) -> bool {
    let member = effective(member);
    if input.is_null() {
        let flags = member.internals.flags;
        return flags.optional || flags.nilable || member.consumes_null();
    }
    match &member.def {
        Def::String => matches!(input, Value::String(_)),
        Def::Int(_) => matches!(input, Value::I64(_) | Value::U64(_)),
        Def::Float(_) => matches!(input, Value::F32(_) | Value::F64(_)),
        Def::Bool => matches!(input, Value::Bool(_)),
        Def::BigInt => matches!(input, Value::BigInt(_)),
        Def::Complex => matches!(input, Value::Complex(_)),
        Def::DateTime => matches!(input, Value::DateTime(_)),
        Def::Literal(options) => input.as_key().is_some_and(|key| options.contains(&key)),
        Def::Enum(enum_def) => input
            .as_key()
            .is_some_and(|key| enum_def.entries.values().any(|v| *v == key)),
        Def::Array(_) | Def::Tuple(_) => matches!(input, Value::Array(_)),
        Def::Object(_) | Def::Record(_) => matches!(input, Value::Map(_)),
        Def::Set(_) => matches!(input, Value::Set(_) | Value::Array(_)),
        _ => false,
    }
}
