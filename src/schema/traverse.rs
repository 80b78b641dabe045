use super::types::{FieldDescriptor, FieldPath, SchemaKind, SchemaNode};

/// Walk a schema and produce the complete ordered descriptor sequence.
///
/// The root is expected to be an object; anything else yields an empty
/// sequence (a deliberate no-op, not an error). Sibling order always
/// follows the schema's declared property order. Every declared property
/// yields at least one descriptor:
///
/// - object with properties: one group descriptor, then its children at
///   depth + 1, each resolving `required` against that object's own
///   required set
/// - array of objects: one descriptor for the array, one for the
///   synthesized item slot at depth + 1, then the item's properties at
///   depth + 2 resolved against the item schema's required set
/// - array with primitive or absent items: a single descriptor
/// - primitives and opaque leaves: a single descriptor
///
/// Pure function of its input; the schema is never mutated and a fresh
/// descriptor sequence is allocated per call.
pub fn traverse(root: &SchemaNode) -> Vec<FieldDescriptor<'_>> {
    let mut out = Vec::new();
    if root.is_object() {
        expand_properties(root, &FieldPath::root(), 0, &mut out);
    }
    out
}

fn expand_properties<'a>(
    parent: &'a SchemaNode,
    base: &FieldPath,
    depth: usize,
    out: &mut Vec<FieldDescriptor<'a>>,
) {
    for (name, node) in &parent.properties {
        let path = base.child(name);
        out.push(FieldDescriptor {
            path: path.clone(),
            node,
            required: parent.is_required(name),
            depth,
        });

        match node.kind {
            Some(SchemaKind::Object) if node.has_properties() => {
                expand_properties(node, &path, depth + 1, out);
            }
            Some(SchemaKind::Array) => {
                // Only arrays of objects expand; primitive or untyped
                // items stay behind the single array descriptor.
                if let Some(items) = node.items.as_deref() {
                    if items.is_object() && items.has_properties() {
                        let item_path = path.index(0);
                        out.push(FieldDescriptor {
                            path: item_path.clone(),
                            node: items,
                            required: false,
                            depth: depth + 1,
                        });
                        expand_properties(items, &item_path, depth + 2, out);
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SchemaNode {
        SchemaNode::from_value(&value)
    }

    #[test]
    fn top_level_properties_in_declared_order() {
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "title": {"type": "string"},
                "bitrate": {"type": "integer"},
                "watermark": {"type": "boolean"}
            }
        }));
        let fields = traverse(&schema);
        let paths: Vec<String> = fields.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(paths, vec!["title", "bitrate", "watermark"]);
        assert!(fields.iter().all(|f| f.depth == 0));
    }

    #[test]
    fn required_resolves_against_immediate_parent() {
        // Worked example: name required at the root, city required inside
        // address even though address itself is optional.
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "address": {
                    "type": "object",
                    "properties": {"city": {"type": "string"}},
                    "required": ["city"]
                }
            },
            "required": ["name"]
        }));
        let fields = traverse(&schema);
        assert_eq!(fields.len(), 3);

        assert_eq!(fields[0].path.to_string(), "name");
        assert!(fields[0].required);
        assert_eq!(fields[0].depth, 0);

        assert_eq!(fields[1].path.to_string(), "address");
        assert!(!fields[1].required);
        assert_eq!(fields[1].depth, 0);

        assert_eq!(fields[2].path.to_string(), "address.city");
        assert!(fields[2].required);
        assert_eq!(fields[2].depth, 1);
    }

    #[test]
    fn absent_required_list_means_all_optional() {
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "a": {"type": "string"},
                "b": {"type": "number"}
            }
        }));
        assert!(traverse(&schema).iter().all(|f| !f.required));
    }

    #[test]
    fn object_branch_emits_group_plus_children() {
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "output": {
                    "type": "object",
                    "properties": {
                        "container": {"type": "string"},
                        "codec": {"type": "string"},
                        "bitrate": {"type": "integer"}
                    }
                }
            }
        }));
        let fields = traverse(&schema);
        // 1 group header + 3 children
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].depth, 0);
        assert!(fields[1..].iter().all(|f| f.depth == 1));
    }

    #[test]
    fn array_of_objects_emits_header_item_slot_and_properties() {
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "clips": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "source": {"type": "string"},
                            "start": {"type": "number"}
                        },
                        "required": ["source"]
                    }
                }
            }
        }));
        let fields = traverse(&schema);
        // 2 headers + 2 item properties
        assert_eq!(fields.len(), 4);

        assert_eq!(fields[0].path.to_string(), "clips");
        assert_eq!(fields[0].depth, 0);

        assert_eq!(fields[1].path.to_string(), "clips[0]");
        assert_eq!(fields[1].depth, 1);
        assert!(!fields[1].required);

        assert_eq!(fields[2].path.to_string(), "clips[0].source");
        assert_eq!(fields[2].depth, 2);
        assert!(fields[2].required);

        assert_eq!(fields[3].path.to_string(), "clips[0].start");
        assert_eq!(fields[3].depth, 2);
        assert!(!fields[3].required);
    }

    #[test]
    fn primitive_array_is_a_single_descriptor() {
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        }));
        let fields = traverse(&schema);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].path.to_string(), "tags");
        assert_eq!(fields[0].depth, 0);
    }

    #[test]
    fn array_without_items_is_a_single_descriptor() {
        let schema = parse(json!({
            "type": "object",
            "properties": {"anything": {"type": "array"}}
        }));
        assert_eq!(traverse(&schema).len(), 1);
    }

    #[test]
    fn empty_object_property_still_yields_one_descriptor() {
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "metadata": {"type": "object", "properties": {}}
            }
        }));
        let fields = traverse(&schema);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].path.to_string(), "metadata");
    }

    #[test]
    fn unknown_kind_is_an_opaque_leaf_never_skipped() {
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "before": {"type": "string"},
                "mystery": {"type": "hologram"},
                "after": {"type": "string"}
            }
        }));
        let fields = traverse(&schema);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].path.to_string(), "mystery");
        assert_eq!(fields[1].node.kind, None);
    }

    #[test]
    fn non_object_root_yields_empty_sequence() {
        assert!(traverse(&parse(json!({"type": "string"}))).is_empty());
        assert!(traverse(&parse(json!({"type": "array", "items": {"type": "object"}}))).is_empty());
        assert!(traverse(&parse(json!(42))).is_empty());
    }

    #[test]
    fn empty_schema_yields_empty_sequence() {
        let schema = parse(json!({"type": "object", "properties": {}}));
        assert!(traverse(&schema).is_empty());
    }

    #[test]
    fn traversal_is_idempotent() {
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "clips": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"source": {"type": "string"}},
                        "required": ["source"]
                    }
                }
            },
            "required": ["name"]
        }));
        let first = traverse(&schema);
        let second = traverse(&schema);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.path, b.path);
            assert_eq!(a.required, b.required);
            assert_eq!(a.depth, b.depth);
            assert_eq!(a.node, b.node);
        }
    }

    #[test]
    fn deep_nesting_accumulates_depth() {
        let schema = parse(json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "object",
                    "properties": {
                        "b": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {"c": {"type": "string"}}
                            }
                        }
                    }
                }
            }
        }));
        let fields = traverse(&schema);
        let depths: Vec<(String, usize)> = fields
            .iter()
            .map(|f| (f.path.to_string(), f.depth))
            .collect();
        assert_eq!(
            depths,
            vec![
                ("a".to_string(), 0),
                ("a.b".to_string(), 1),
                ("a.b[0]".to_string(), 2),
                ("a.b[0].c".to_string(), 3),
            ]
        );
    }
}
