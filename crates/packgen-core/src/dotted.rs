//! Dotted key paths (`devServer.port`) over JSON objects

use serde_json::{Map, Value};

/// Set `value` at `path`, creating intermediate objects. A non-object found
/// on the way is replaced, so the last write wins.
pub(crate) fn set(root: &mut Map<String, Value>, path: &str, value: Value) {
    let keys: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = keys.split_last() else {
        return;
    };

    let mut current = root;
    for key in parents {
        let entry = current
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry {
            Value::Object(map) => map,
            _ => unreachable!("entry was just made an object"),
        };
    }
    current.insert(last.to_string(), value);
}

pub(crate) fn get<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut keys = path.split('.');
    let mut current = root.get(keys.next()?)?;
    for key in keys {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

pub(crate) fn get_mut<'a>(root: &'a mut Map<String, Value>, path: &str) -> Option<&'a mut Value> {
    let mut keys = path.split('.');
    let mut current = root.get_mut(keys.next()?)?;
    for key in keys {
        current = current.as_object_mut()?.get_mut(key)?;
    }
    Some(current)
}

pub(crate) fn remove(root: &mut Map<String, Value>, path: &str) -> Option<Value> {
    match path.rsplit_once('.') {
        Some((parent, last)) => get_mut(root, parent)?.as_object_mut()?.shift_remove(last),
        None => root.shift_remove(path),
    }
}

/// Append `value` to the array at `path` unless already present.
/// A missing or non-array slot becomes a one-element array.
pub(crate) fn push_unique(root: &mut Map<String, Value>, path: &str, value: Value) {
    match get_mut(root, path) {
        Some(Value::Array(items)) => {
            if !items.contains(&value) {
                items.push(value);
            }
        }
        _ => set(root, path, Value::Array(vec![value])),
    }
}
