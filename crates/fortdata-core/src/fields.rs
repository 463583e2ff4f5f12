//! Field lookup over untyped JSON objects.
//!
//! Backend documents are parsed with two explicit lookup modes:
//! - required: the key must be present, otherwise [`Error::MissingField`]
//! - optional: a missing or `null` key yields `None` (or a caller default)
//!
//! A key that is present with the wrong JSON type is always an error.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A JSON value convertible into a typed field.
pub trait FieldValue<'a>: Sized {
    /// Human-readable type name used in [`Error::WrongType`].
    const EXPECTED: &'static str;

    fn from_json(value: &'a Value) -> Option<Self>;
}

impl FieldValue<'_> for String {
    const EXPECTED: &'static str = "a string";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl<'a> FieldValue<'a> for &'a str {
    const EXPECTED: &'static str = "a string";

    fn from_json(value: &'a Value) -> Option<Self> {
        value.as_str()
    }
}

impl FieldValue<'_> for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FieldValue<'_> for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FieldValue<'_> for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FieldValue<'_> for Value {
    const EXPECTED: &'static str = "a JSON value";

    fn from_json(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<'a> FieldValue<'a> for &'a Value {
    const EXPECTED: &'static str = "a JSON value";

    fn from_json(value: &'a Value) -> Option<Self> {
        Some(value)
    }
}

impl<'a> FieldValue<'a> for &'a [Value] {
    const EXPECTED: &'static str = "an array";

    fn from_json(value: &'a Value) -> Option<Self> {
        value.as_array().map(Vec::as_slice)
    }
}

impl<'a> FieldValue<'a> for &'a Map<String, Value> {
    const EXPECTED: &'static str = "an object";

    fn from_json(value: &'a Value) -> Option<Self> {
        value.as_object()
    }
}

impl FieldValue<'_> for Map<String, Value> {
    const EXPECTED: &'static str = "an object";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl FieldValue<'_> for Vec<String> {
    const EXPECTED: &'static str = "an array of strings";

    fn from_json(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|v| v.as_str().map(String::from))
            .collect()
    }
}

impl FieldValue<'_> for HashMap<String, i64> {
    const EXPECTED: &'static str = "an object of integers";

    fn from_json(value: &Value) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(k, v)| v.as_i64().map(|n| (k.clone(), n)))
            .collect()
    }
}

/// Borrowed view of a JSON object, tagged with the entity being parsed.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    context: &'static str,
}

impl<'a> Fields<'a> {
    /// Wrap a value that must be a JSON object.
    pub fn new(value: &'a Value, context: &'static str) -> Result<Self> {
        value
            .as_object()
            .map(|map| Self { map, context })
            .ok_or_else(|| Error::WrongType {
                context,
                field: "<root>".to_string(),
                expected: "an object",
            })
    }

    pub const fn from_map(map: &'a Map<String, Value>, context: &'static str) -> Self {
        Self { map, context }
    }

    pub const fn context(&self) -> &'static str {
        self.context
    }

    pub const fn as_map(&self) -> &'a Map<String, Value> {
        self.map
    }

    /// Whether `key` is present with a non-null value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Raw lookup; `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Required lookup.
    pub fn req<T: FieldValue<'a>>(&self, key: &str) -> Result<T> {
        let value = self.map.get(key).ok_or_else(|| self.missing(key))?;
        T::from_json(value).ok_or_else(|| self.wrong_type(key, T::EXPECTED))
    }

    /// Optional lookup.
    pub fn opt<T: FieldValue<'a>>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|value| T::from_json(value).ok_or_else(|| self.wrong_type(key, T::EXPECTED)))
            .transpose()
    }

    /// Optional lookup with a default for absent keys.
    pub fn or<T: FieldValue<'a>>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.opt(key)?.unwrap_or(default))
    }

    pub fn timestamp(&self, key: &str) -> Result<DateTime<Utc>> {
        let raw: &str = self.req(key)?;
        self.parse_timestamp(key, raw)
    }

    pub fn opt_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        self.opt::<&str>(key)?
            .map(|raw| self.parse_timestamp(key, raw))
            .transpose()
    }

    /// Required nested object.
    pub fn object(&self, key: &str, context: &'static str) -> Result<Self> {
        let map: &Map<String, Value> = self.req(key)?;
        Ok(Self::from_map(map, context))
    }

    /// Optional nested object.
    pub fn opt_object(&self, key: &str, context: &'static str) -> Result<Option<Self>> {
        Ok(self
            .opt::<&Map<String, Value>>(key)?
            .map(|map| Self::from_map(map, context)))
    }

    /// Required array, each element parsed with `parse`.
    pub fn list<T>(&self, key: &str, parse: impl Fn(&'a Value) -> Result<T>) -> Result<Vec<T>> {
        let values: &[Value] = self.req(key)?;
        values.iter().map(parse).collect()
    }

    /// Optional array defaulting to empty, each element parsed with `parse`.
    pub fn list_or_empty<T>(
        &self,
        key: &str,
        parse: impl Fn(&'a Value) -> Result<T>,
    ) -> Result<Vec<T>> {
        let empty: &'a [Value] = &[];
        let values = self.or(key, empty)?;
        values.iter().map(parse).collect()
    }

    pub fn missing(&self, key: &str) -> Error {
        Error::MissingField {
            context: self.context,
            field: key.to_string(),
        }
    }

    fn wrong_type(&self, key: &str, expected: &'static str) -> Error {
        Error::WrongType {
            context: self.context,
            field: key.to_string(),
            expected,
        }
    }

    fn parse_timestamp(&self, key: &str, raw: &str) -> Result<DateTime<Utc>> {
        parse_timestamp(raw).ok_or_else(|| Error::InvalidTimestamp {
            context: self.context,
            field: key.to_string(),
            value: raw.to_string(),
        })
    }
}

/// Parse an ISO-8601 timestamp into UTC.
///
/// Accepts RFC 3339 (`2021-03-04T05:06:07.890Z`, explicit offsets) and naive
/// timestamps without an offset, which are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Split a `type:id` composite on the first colon.
pub fn split_type_id(value: &str, context: &'static str) -> Result<(String, String)> {
    value
        .split_once(':')
        .map(|(kind, id)| (kind.to_string(), id.to_string()))
        .ok_or_else(|| Error::MalformedComposite {
            context,
            value: value.to_string(),
        })
}
