use serde_json::Value;

use super::types::{SchemaKind, SchemaNode};

impl SchemaNode {
    /// Parse a schema fragment out of raw JSON.
    ///
    /// Total and permissive by policy: anything that is not an object, or
    /// any attribute with the wrong shape, degrades toward an opaque leaf
    /// instead of erroring. Process schemas are often hand-authored and a
    /// bad fragment must never take the viewer down. Unrecognized `type`
    /// values map to `kind: None`.
    pub fn from_value(value: &Value) -> SchemaNode {
        let Some(obj) = value.as_object() else {
            return SchemaNode::default();
        };

        SchemaNode {
            kind: obj
                .get("type")
                .and_then(Value::as_str)
                .and_then(SchemaKind::parse),
            description: obj
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            format: obj
                .get("format")
                .and_then(Value::as_str)
                .map(str::to_string),
            default: obj.get("default").cloned(),
            enum_values: obj
                .get("enum")
                .and_then(Value::as_array)
                .map(|values| values.to_vec()),
            minimum: obj.get("minimum").and_then(Value::as_f64),
            maximum: obj.get("maximum").and_then(Value::as_f64),
            min_length: obj.get("minLength").and_then(Value::as_u64),
            max_length: obj.get("maxLength").and_then(Value::as_u64),
            pattern: obj
                .get("pattern")
                .and_then(Value::as_str)
                .map(str::to_string),
            // Map iteration follows document order (serde_json preserve_order)
            properties: obj
                .get("properties")
                .and_then(Value::as_object)
                .map(|props| {
                    props
                        .iter()
                        .map(|(name, child)| (name.clone(), SchemaNode::from_value(child)))
                        .collect()
                })
                .unwrap_or_default(),
            required: obj
                .get("required")
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            items: obj
                .get("items")
                .map(|items| Box::new(SchemaNode::from_value(items))),
        }
    }
}
