use serde_json::json;
use showreel_client_rust::schema::{traverse, SchemaKind, SchemaNode};

// End-to-end traversal checks against realistic process input schemas,
// through the public API only.

#[test]
fn transcode_schema_renders_every_declared_field_in_order() {
    let schema = SchemaNode::from_value(&json!({
        "type": "object",
        "properties": {
            "source": {"type": "string", "format": "uri", "description": "Input media URL"},
            "codec": {"type": "string", "enum": ["h264", "vp9", "av1"], "default": "h264"},
            "output": {
                "type": "object",
                "properties": {
                    "container": {"type": "string", "default": "mp4"},
                    "bitrate": {"type": "integer", "minimum": 100, "maximum": 50000}
                },
                "required": ["container"]
            },
            "tags": {"type": "array", "items": {"type": "string"}},
            "overlays": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "image": {"type": "string", "format": "uri"},
                        "opacity": {"type": "number", "minimum": 0, "maximum": 1}
                    },
                    "required": ["image"]
                }
            }
        },
        "required": ["source"]
    }));

    let fields = traverse(&schema);
    let listing: Vec<(String, usize, bool)> = fields
        .iter()
        .map(|f| (f.path.to_string(), f.depth, f.required))
        .collect();

    assert_eq!(
        listing,
        vec![
            ("source".to_string(), 0, true),
            ("codec".to_string(), 0, false),
            ("output".to_string(), 0, false),
            ("output.container".to_string(), 1, true),
            ("output.bitrate".to_string(), 1, false),
            ("tags".to_string(), 0, false),
            ("overlays".to_string(), 0, false),
            ("overlays[0]".to_string(), 1, false),
            ("overlays[0].image".to_string(), 2, true),
            ("overlays[0].opacity".to_string(), 2, false),
        ]
    );
}

#[test]
fn descriptor_nodes_carry_constraint_metadata() {
    let schema = SchemaNode::from_value(&json!({
        "type": "object",
        "properties": {
            "bitrate": {"type": "integer", "minimum": 100, "maximum": 50000, "default": 2000}
        }
    }));

    let fields = traverse(&schema);
    assert_eq!(fields.len(), 1);
    let node = fields[0].node;
    assert_eq!(node.kind, Some(SchemaKind::Integer));
    assert_eq!(node.minimum, Some(100.0));
    assert_eq!(node.maximum, Some(50000.0));
    assert_eq!(node.default, Some(json!(2000)));
}

#[test]
fn hand_authored_schema_with_broken_fragments_still_renders() {
    // Every declared property must survive, no matter how malformed
    let schema = SchemaNode::from_value(&json!({
        "type": "object",
        "properties": {
            "good": {"type": "string"},
            "untyped": {},
            "alien": {"type": "quaternion"},
            "bare_array": {"type": "array"},
            "scalar_fragment": 17
        }
    }));

    let fields = traverse(&schema);
    assert_eq!(fields.len(), 5);
    assert!(fields.iter().all(|f| f.depth == 0));
    assert!(fields.iter().all(|f| !f.required));
}

#[test]
fn traversal_does_not_mutate_the_schema() {
    let schema = SchemaNode::from_value(&json!({
        "type": "object",
        "properties": {
            "a": {"type": "object", "properties": {"b": {"type": "string"}}}
        }
    }));
    let snapshot = schema.clone();
    let _ = traverse(&schema);
    let _ = traverse(&schema);
    assert_eq!(schema, snapshot);
}
