//! Generic operations on configuration trees.
//!
//! These work on `serde_json::Value` rather than the typed schema so that
//! a user file may carry fields this build does not know about: the merge
//! keeps them, the typed layer ignores them, and a future build picks them
//! up again.

use serde_json::{Map, Value};

/// Recursively merge `overlay` over `base`, returning a fresh tree.
///
/// Objects merge key-by-key; everything else -- primitives, arrays and
/// `null` -- replaces the base value wholesale. Neither input is mutated.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let entry = match merged.get(key) {
                    Some(base_value)
                        if base_value.is_object() && overlay_value.is_object() =>
                    {
                        deep_merge(base_value, overlay_value)
                    }
                    _ => overlay_value.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        _ => overlay.clone(),
    }
}

/// Resolve a period-delimited key path. Returns `None` the moment a
/// segment is missing or the current node is not an object.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Return a copy of `root` with the leaf at `path` replaced by `value`.
///
/// Missing intermediate segments are created as empty objects; an
/// intermediate that exists but is not an object is replaced by one.
pub fn set_path(root: &Value, path: &str, value: Value) -> Value {
    let mut new_root = root.clone();
    let segments: Vec<&str> = path.split('.').collect();

    let mut current = &mut new_root;
    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    for segment in &segments[..segments.len() - 1] {
        let map = current.as_object_mut().expect("cursor is always an object");
        let next = map
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !next.is_object() {
            *next = Value::Object(Map::new());
        }
        current = next;
    }

    let last = segments[segments.len() - 1];
    current
        .as_object_mut()
        .expect("cursor is always an object")
        .insert(last.to_string(), value);

    new_root
}
