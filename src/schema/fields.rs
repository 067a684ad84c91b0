//! Field-by-field reader over an untrusted JSON object.
//!
//! Every accessor records a [`ValidationIssue`] on failure and returns `None`,
//! so a record builder can read all of its fields before giving up. That is
//! what makes validation errors aggregate rather than first-failure.

use serde_json::{Map, Value};

use super::rules;
use super::UnknownFields;
use crate::error::{Rule, ValidationIssue};

/// Collected issues for one response body.
#[derive(Debug, Default)]
pub(crate) struct Issues(Vec<ValidationIssue>);

impl Issues {
    pub(crate) fn push(&mut self, path: String, rule: Rule) {
        self.0.push(ValidationIssue { path, rule });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_inner(self) -> Vec<ValidationIssue> {
        self.0
    }
}

/// JSON type name used in `WrongType` issues.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

pub(crate) fn display_path(path: &str) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.to_string()
    }
}

pub(crate) struct Fields<'v, 'i> {
    prefix: String,
    map: &'v Map<String, Value>,
    issues: &'i mut Issues,
}

impl<'v, 'i> Fields<'v, 'i> {
    /// Opens `value` as an object whose allowed keys are `known`.
    ///
    /// Records `WrongType` if `value` is not an object, and `UnexpectedField`
    /// for each key outside `known` unless the policy ignores them.
    pub(crate) fn open(
        value: &'v Value,
        prefix: String,
        known: &[&str],
        policy: UnknownFields,
        issues: &'i mut Issues,
    ) -> Option<Self> {
        let Value::Object(map) = value else {
            issues.push(
                display_path(&prefix),
                Rule::WrongType {
                    expected: "object",
                    found: type_name(value),
                },
            );
            return None;
        };

        if policy == UnknownFields::Reject {
            for key in map.keys().filter(|key| !known.contains(&key.as_str())) {
                issues.push(join(&prefix, key), Rule::UnexpectedField);
            }
        }

        Some(Self { prefix, map, issues })
    }

    pub(crate) fn path(&self, key: &str) -> String {
        join(&self.prefix, key)
    }

    /// Issues collector, for nested readers.
    pub(crate) fn issues(&mut self) -> &mut Issues {
        &mut *self.issues
    }

    fn fail<T>(&mut self, key: &str, rule: Rule) -> Option<T> {
        let path = self.path(key);
        self.issues.push(path, rule);
        None
    }

    pub(crate) fn wrong_type<T>(&mut self, key: &str, expected: &'static str, value: &Value) -> Option<T> {
        self.fail(
            key,
            Rule::WrongType {
                expected,
                found: type_name(value),
            },
        )
    }

    /// A field that must be present (any type).
    pub(crate) fn required(&mut self, key: &str) -> Option<&'v Value> {
        match self.map.get(key) {
            Some(value) => Some(value),
            None => self.fail(key, Rule::Missing),
        }
    }

    /// A field that may be absent. Presence of `null` is not absence.
    pub(crate) fn optional(&self, key: &str) -> Option<&'v Value> {
        self.map.get(key)
    }

    pub(crate) fn string(&mut self, key: &str) -> Option<&'v str> {
        let value = self.required(key)?;
        self.expect_string(key, value)
    }

    pub(crate) fn expect_string(&mut self, key: &str, value: &'v Value) -> Option<&'v str> {
        match value {
            Value::String(text) => Some(text.as_str()),
            other => self.wrong_type(key, "string", other),
        }
    }

    pub(crate) fn boolean(&mut self, key: &str) -> Option<bool> {
        match self.required(key)? {
            Value::Bool(flag) => Some(*flag),
            other => self.wrong_type(key, "boolean", other),
        }
    }

    pub(crate) fn network(&mut self, key: &str) -> Option<u32> {
        match self.required(key)? {
            Value::Number(number) => match rules::network_id(number) {
                Ok(id) => Some(id),
                Err(rule) => self.fail(key, rule),
            },
            other => self.wrong_type(key, "number", other),
        }
    }

    pub(crate) fn hash(&mut self, key: &str) -> Option<String> {
        let text = self.string(key)?;
        match rules::check_hash(text) {
            Ok(()) => Some(text.to_string()),
            Err(rule) => self.fail(key, rule),
        }
    }

    pub(crate) fn claim_hash(&mut self, key: &str) -> Option<Option<String>> {
        let text = self.string(key)?;
        match rules::normalize_claim_hash(text) {
            Ok(hash) => Some(hash),
            Err(rule) => self.fail(key, rule),
        }
    }

    pub(crate) fn counter(&mut self, key: &str) -> Option<u64> {
        let value = self.required(key)?;
        self.counter_value(key, value)
    }

    pub(crate) fn counter_value(&mut self, key: &str, value: &'v Value) -> Option<u64> {
        let text = self.expect_string(key, value)?;
        match rules::parse_counter(text) {
            Ok(count) => Some(count),
            Err(rule) => self.fail(key, rule),
        }
    }

    /// A required array of hashes; every entry is checked.
    pub(crate) fn hash_list(&mut self, key: &str) -> Option<Vec<String>> {
        let items = match self.required(key)? {
            Value::Array(items) => items,
            other => return self.wrong_type(key, "array", other),
        };

        let base = self.path(key);
        let mut hashes = Vec::with_capacity(items.len());
        let mut complete = true;
        for (index, item) in items.iter().enumerate() {
            let path = format!("{}[{}]", base, index);
            let checked = match item {
                Value::String(text) => rules::check_hash(text).map(|()| text.clone()),
                other => Err(Rule::WrongType {
                    expected: "string",
                    found: type_name(other),
                }),
            };
            match checked {
                Ok(hash) => hashes.push(hash),
                Err(rule) => {
                    self.issues.push(path, rule);
                    complete = false;
                }
            }
        }

        complete.then_some(hashes)
    }
}
