// Value-bag operations for the editable form variant. The bag is a plain
// JSON value owned by the caller; paths come from traversal descriptors.
use serde_json::{Map, Value};

use super::types::{FieldPath, PathSegment, SchemaNode};

/// Look up the raw value stored at `path`, if any.
pub fn value_at<'v>(bag: &'v Value, path: &FieldPath) -> Option<&'v Value> {
    let mut current = bag;
    for segment in path.segments() {
        current = match segment {
            PathSegment::Key(key) => current.as_object()?.get(key)?,
            PathSegment::Index(idx) => current.as_array()?.get(*idx)?,
        };
    }
    Some(current)
}

/// Current value at `path`, falling back to the field's schema default.
/// Returns `None` when neither is present. Never panics.
pub fn resolve_value<'v>(
    bag: &'v Value,
    path: &FieldPath,
    node: &'v SchemaNode,
) -> Option<&'v Value> {
    value_at(bag, path).or(node.default.as_ref())
}

/// Return a new bag with `path` set to `new_value`, preserving all other
/// entries. Missing intermediate segments are created as the matching
/// container: an object for key segments, a null-padded array for index
/// segments. A segment whose existing value has the wrong shape is
/// replaced by the container the path requires.
pub fn apply_change(bag: &Value, path: &FieldPath, new_value: Value) -> Value {
    let mut out = bag.clone();
    set_at(&mut out, path.segments(), new_value);
    out
}

fn set_at(target: &mut Value, segments: &[PathSegment], new_value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *target = new_value;
        return;
    };

    match head {
        PathSegment::Key(key) => {
            if !matches!(target, Value::Object(_)) {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(map) = target {
                let slot = map.entry(key.clone()).or_insert(Value::Null);
                set_at(slot, rest, new_value);
            }
        }
        PathSegment::Index(idx) => {
            if !matches!(target, Value::Array(_)) {
                *target = Value::Array(Vec::new());
            }
            if let Value::Array(items) = target {
                if items.len() <= *idx {
                    items.resize(*idx + 1, Value::Null);
                }
                set_at(&mut items[*idx], rest, new_value);
            }
        }
    }
}
