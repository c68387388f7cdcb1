//! Stateless assertions over dispatched responses
//!
//! Each check panics with a fixed, readable message when its condition does
//! not hold, so it can be used directly inside `#[test]` functions. Panic
//! locations point at the calling test.

use crate::client::Response;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// JSON value kinds accepted by [`Examine::is_correct_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Integral number
    Integer,
    /// Any number, integral or not
    Number,
    /// String
    String,
    /// Array
    Array,
    /// Object
    Object,
}

impl JsonType {
    /// Most specific kind of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether `value` is of this kind. `Number` also accepts integers.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            kind => *kind == Self::of(value),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assertion helpers for response records and bodies.
pub struct Examine;

impl Examine {
    /// Assert the response status equals `expected`.
    #[track_caller]
    pub fn validate_status(response: &Response, expected: u16) {
        assert!(
            response.status() == expected,
            "expected: response status code is {}.",
            expected
        );
    }

    /// Assert the whole response body equals `expected`.
    #[track_caller]
    pub fn validate_body(response: &Response, expected: &Value) {
        assert!(
            response.body() == expected,
            "expected: response body is consistent with the expected."
        );
    }

    /// Assert each key is present (`include`) or absent (`!include`).
    ///
    /// Keys not listed are not inspected, so extra properties pass.
    #[track_caller]
    pub fn is_included<K: AsRef<str>>(body: &Map<String, Value>, keys: &[K], include: bool) {
        for key in keys {
            let key = key.as_ref();
            if include {
                assert!(
                    body.contains_key(key),
                    "expected: property of {} is included in response body.",
                    key
                );
            } else {
                assert!(
                    !body.contains_key(key),
                    "expected: property of {} is not included in response body.",
                    key
                );
            }
        }
    }

    /// Assert the body's key set is exactly `keys`.
    #[track_caller]
    pub fn is_key_consistent<K: AsRef<str>>(body: &Map<String, Value>, keys: &[K]) {
        let actual: HashSet<&str> = body.keys().map(String::as_str).collect();
        let expected: HashSet<&str> = keys.iter().map(AsRef::as_ref).collect();
        assert!(
            actual == expected,
            "expected: response has to contain properties of {}.",
            keys.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
        );
    }

    /// Assert each key's value is one of the listed kinds.
    ///
    /// A missing key is checked as `null`.
    #[track_caller]
    pub fn is_correct_type(body: &Map<String, Value>, expected: &[(&str, &[JsonType])]) {
        for (key, kinds) in expected {
            let value = body.get(*key).unwrap_or(&Value::Null);
            assert!(
                kinds.iter().any(|kind| kind.matches(value)),
                "expected: type of {} is {}.",
                key,
                describe_kinds(kinds)
            );
        }
    }

    /// Assert `value` is one of `members`.
    #[track_caller]
    pub fn is_member<T>(value: &T, members: &[T])
    where
        T: PartialEq + fmt::Display,
    {
        assert!(
            members.contains(value),
            "expected: {} is either {}",
            value,
            members
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or ")
        );
    }
}

fn describe_kinds(kinds: &[JsonType]) -> String {
    match kinds {
        [single] => single.to_string(),
        many => format!(
            "({})",
            many.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
