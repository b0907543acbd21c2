//! Shape Module
//!
//! Small helpers for reshaping JSON objects and sequences.

use serde_json::{Map, Value};

use crate::error::{Result, ShapeError};

// == Pick ==
/// Copies only the listed keys that exist in `object`.
pub fn pick<K: AsRef<str>>(object: &Map<String, Value>, keys: &[K]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| {
            let key = key.as_ref();
            object.get(key).map(|value| (key.to_string(), value.clone()))
        })
        .collect()
}

// == Omit ==
/// Copies every key of `object` except the listed ones.
pub fn omit<K: AsRef<str>>(object: &Map<String, Value>, keys: &[K]) -> Map<String, Value> {
    object
        .iter()
        .filter(|(name, _)| !keys.iter().any(|key| key.as_ref() == name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// [`pick`] for an arbitrary JSON value.
///
/// # Errors
/// [`ShapeError::NotAnObject`] if `value` is not an object.
pub fn pick_value<K: AsRef<str>>(value: &Value, keys: &[K]) -> Result<Value> {
    as_object(value).map(|object| Value::Object(pick(object, keys)))
}

/// [`omit`] for an arbitrary JSON value.
///
/// # Errors
/// [`ShapeError::NotAnObject`] if `value` is not an object.
pub fn omit_value<K: AsRef<str>>(value: &Value, keys: &[K]) -> Result<Value> {
    as_object(value).map(|object| Value::Object(omit(object, keys)))
}

fn as_object(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        let kind = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        ShapeError::NotAnObject(kind.to_string())
    })
}

// == Zip ==
/// Pairs elements by index up to the longer input; the shorter side is
/// padded with `None`.
pub fn zip<A, B>(left: Vec<A>, right: Vec<B>) -> Vec<(Option<A>, Option<B>)> {
    let len = left.len().max(right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    (0..len).map(|_| (left.next(), right.next())).collect()
}

// == Group N ==
/// Splits `items` into consecutive groups of at most `size` elements.
///
/// # Errors
/// [`ShapeError::ZeroGroupSize`] if `size` is zero.
pub fn group_n<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(ShapeError::ZeroGroupSize);
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}
