//! Dotted key paths into JSON documents (`ui.theme`, `servers.0.host`)

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyError {
    #[error("Key path cannot be empty")]
    Empty,

    #[error("Empty segment in key path '{0}'")]
    EmptySegment(String),

    #[error("Cannot set '{key}': '{parent}' is not an object or array")]
    NotAContainer { key: String, parent: String },

    #[error("Cannot set '{key}': '{parent}' has {len} elements, no index '{index}'")]
    BadIndex {
        key: String,
        parent: String,
        index: String,
        len: usize,
    },
}

fn segments(key: &str) -> Result<Vec<&str>, KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }

    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(KeyError::EmptySegment(key.to_string()));
    }

    Ok(segments)
}

fn parent_name(parents: &[&str]) -> String {
    if parents.is_empty() {
        "(root)".to_string()
    } else {
        parents.join(".")
    }
}

fn not_a_container(key: &str, parents: &[&str]) -> KeyError {
    KeyError::NotAContainer {
        key: key.to_string(),
        parent: parent_name(parents),
    }
}

fn element_mut<'a>(
    items: &'a mut [Value],
    key: &str,
    parents: &[&str],
    segment: &str,
) -> Result<&'a mut Value, KeyError> {
    let len = items.len();
    segment
        .parse::<usize>()
        .ok()
        .and_then(|i| items.get_mut(i))
        .ok_or_else(|| KeyError::BadIndex {
            key: key.to_string(),
            parent: parent_name(parents),
            index: segment.to_string(),
            len,
        })
}

/// Look up a dotted key. Numeric segments index into arrays.
pub fn get_key<'a>(doc: &'a Value, key: &str) -> Result<Option<&'a Value>, KeyError> {
    let mut current = doc;

    for segment in segments(key)? {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };

        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

/// Set a dotted key, creating intermediate objects as needed.
///
/// A null document is replaced by an empty object first. Numeric segments
/// address existing array elements; arrays are never grown. Existing scalar
/// values along the path are never overwritten.
pub fn set_key(doc: &mut Value, key: &str, value: Value) -> Result<(), KeyError> {
    let segments = segments(key)?;
    let (last, parents) = segments.split_last().ok_or(KeyError::Empty)?;

    if doc.is_null() {
        *doc = Value::Object(Map::new());
    }

    let mut current = doc;
    for (depth, segment) in parents.iter().enumerate() {
        current = match current {
            Value::Object(map) => map
                .entry(*segment)
                .or_insert_with(|| Value::Object(Map::new())),
            Value::Array(items) => element_mut(items, key, &parents[..depth], segment)?,
            _ => return Err(not_a_container(key, &parents[..depth])),
        };
    }

    match current {
        Value::Object(map) => {
            map.insert((*last).to_string(), value);
        }
        Value::Array(items) => *element_mut(items, key, parents, last)? = value,
        _ => return Err(not_a_container(key, parents)),
    }

    Ok(())
}

/// Parse a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
