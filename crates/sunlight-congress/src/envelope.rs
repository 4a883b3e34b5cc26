//! Response envelope decoding.
//!
//! Every response is wrapped as `{"response": {...}}`. Lists are a named
//! container holding single-key objects:
//!
//! ```json
//! {"response": {"committees": [{"committee": {"id": "HSAG", ...}}, ...]}}
//! ```
//!
//! Each entity family declares its wrapper vocabulary through [`Entity`]
//! (`ITEM_KEY` / `LIST_KEY`); [`unwrap_item`] and [`unwrap_list`] are the one
//! generic algorithm used by all of them. [`One`] and [`Many`] are the shapes
//! an endpoint call decodes into.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Location inside a response body, used to name the offending value in a
/// [`DecodeError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath(String);

impl JsonPath {
    #[must_use]
    pub fn root() -> Self {
        Self("$".to_string())
    }

    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        if self.0 == "$" {
            Self(key.to_string())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    fn error(&self, message: impl Into<String>) -> DecodeError {
        DecodeError::new(self.0.clone(), message)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wrapper vocabulary for one entity family.
pub trait Entity: Sized {
    /// Key wrapping a single entity, e.g. `"legislator"`.
    const ITEM_KEY: &'static str;
    /// Container holding a list of wrapped entities, e.g. `"legislators"`.
    const LIST_KEY: &'static str;

    /// Decode the entity's own object (the value under `ITEM_KEY`).
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if `value` does not have the entity's shape.
    fn from_json(value: &Value, path: &JsonPath) -> Result<Self, DecodeError>;
}

/// A shape an endpoint response decodes into.
pub trait Shape {
    type Output;

    /// Decode a whole response body.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` naming the first location that does not match.
    fn decode(body: &Value) -> Result<Self::Output, DecodeError>;
}

/// `{"response": {"<item>": {...}}}`
pub struct One<T>(PhantomData<T>);

/// `{"response": {"<list>": [{"<item>": {...}}, ...]}}`
pub struct Many<T>(PhantomData<T>);

impl<T: Entity> Shape for One<T> {
    type Output = T;

    fn decode(body: &Value) -> Result<T, DecodeError> {
        let root = JsonPath::root();
        let (response, path) = unwrap_item(body, "response", &root)?;
        let (item, path) = unwrap_item(response, T::ITEM_KEY, &path)?;
        T::from_json(item, &path)
    }
}

impl<T: Entity> Shape for Many<T> {
    type Output = Vec<T>;

    fn decode(body: &Value) -> Result<Vec<T>, DecodeError> {
        let root = JsonPath::root();
        let (response, path) = unwrap_item(body, "response", &root)?;
        let object = as_object(response, &path)?;
        match object.get(T::LIST_KEY) {
            Some(list) => unwrap_list(list, &path.key(T::LIST_KEY)),
            None => Err(path.error(format!("missing field `{}`", T::LIST_KEY))),
        }
    }
}

/// The value stored under `key` in `value`, together with its path.
///
/// # Errors
///
/// Returns `DecodeError` if `value` is not an object or lacks `key`.
pub fn unwrap_item<'a>(
    value: &'a Value,
    key: &str,
    path: &JsonPath,
) -> Result<(&'a Value, JsonPath), DecodeError> {
    let object = as_object(value, path)?;
    object
        .get(key)
        .map(|inner| (inner, path.key(key)))
        .ok_or_else(|| path.error(format!("missing field `{key}`")))
}

/// Strip single-key wrappers from a list of `{"<T::ITEM_KEY>": {...}}`
/// objects, preserving order. `null` decodes as an empty list.
///
/// # Errors
///
/// Returns `DecodeError` if `list` is not an array or any element is not a
/// wrapped `T`.
pub fn unwrap_list<T: Entity>(list: &Value, path: &JsonPath) -> Result<Vec<T>, DecodeError> {
    let items = match list {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            return Err(path.error(format!("expected an array, found {}", kind(other))));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, wrapped)| {
            let (item, item_path) = unwrap_item(wrapped, T::ITEM_KEY, &path.index(i))?;
            T::from_json(item, &item_path)
        })
        .collect()
}

/// Decode a flat record object. `null` values are treated as absent; absent
/// fields take their default. A type mismatch is reported at the offending
/// field.
///
/// # Errors
///
/// Returns `DecodeError` if `value` is not an object or a field has the wrong type.
pub fn decode_record<T: DeserializeOwned>(value: &Value, path: &JsonPath) -> Result<T, DecodeError> {
    let object = as_object(value, path)?;
    let present: Map<String, Value> = object
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    T::deserialize(Value::Object(present)).map_err(|err| {
        field_error::<T>(object, path).unwrap_or_else(|| path.error(err.to_string()))
    })
}

/// Re-decode each present field on its own and report the first one that
/// fails, in the order serde visits them.
fn field_error<T: DeserializeOwned>(
    object: &Map<String, Value>,
    path: &JsonPath,
) -> Option<DecodeError> {
    object
        .iter()
        .filter(|(_, v)| !v.is_null())
        .find_map(|(key, value)| {
            let single = Map::from_iter([(key.clone(), value.clone())]);
            T::deserialize(Value::Object(single))
                .err()
                .map(|err| path.key(key).error(err.to_string()))
        })
}

/// Decode a scalar stored directly under `key`.
///
/// # Errors
///
/// Returns `DecodeError` if the key is missing or holds the wrong type.
pub fn decode_field<T: DeserializeOwned>(
    value: &Value,
    key: &str,
    path: &JsonPath,
) -> Result<T, DecodeError> {
    let (inner, path) = unwrap_item(value, key, path)?;
    T::deserialize(inner).map_err(|err| path.error(err.to_string()))
}

fn as_object<'a>(value: &'a Value, path: &JsonPath) -> Result<&'a Map<String, Value>, DecodeError> {
    value
        .as_object()
        .ok_or_else(|| path.error(format!("expected an object, found {}", kind(value))))
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
