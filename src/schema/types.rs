use serde_json::Value;
use std::fmt;

/// Recognized `type` values from the JSON Schema subset the platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
}

impl SchemaKind {
    pub fn parse(s: &str) -> Option<SchemaKind> {
        match s {
            "object" => Some(SchemaKind::Object),
            "array" => Some(SchemaKind::Array),
            "string" => Some(SchemaKind::String),
            "number" => Some(SchemaKind::Number),
            "integer" => Some(SchemaKind::Integer),
            "boolean" => Some(SchemaKind::Boolean),
            _ => None,
        }
    }

    /// Short label shown next to a field in the viewer.
    pub fn badge(&self) -> &'static str {
        match self {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
        }
    }
}

/// One node of a parsed schema tree.
///
/// `kind: None` marks an opaque leaf: the fragment either had no `type`
/// or one we do not recognize. Opaque leaves are still rendered (with no
/// type badge), never skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub kind: Option<SchemaKind>,
    pub description: Option<String>,
    pub format: Option<String>,
    pub default: Option<Value>,
    pub enum_values: Option<Vec<Value>>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    /// Object properties in document order. Empty for non-objects.
    pub properties: Vec<(String, SchemaNode)>,
    /// Required property names as declared. Names with no matching
    /// property are kept but never match anything at traversal time.
    pub required: Vec<String>,
    /// Item schema for arrays. Absent means an opaque/untyped array.
    pub items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    pub fn is_object(&self) -> bool {
        self.kind == Some(SchemaKind::Object)
    }

    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// One step of a field path: a property name or an array slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Path from the schema root to a field, used as the field's stable
/// identity across render passes and as the key into the value bag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> FieldPath {
        FieldPath(Vec::new())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend with a property name.
    pub fn child(&self, name: &str) -> FieldPath {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(name.to_string()));
        FieldPath(segments)
    }

    /// Extend with an array slot.
    pub fn index(&self, idx: usize) -> FieldPath {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(idx));
        FieldPath(segments)
    }

    /// Last property name on the path, if any. Used for field labels.
    pub fn field_name(&self) -> Option<&str> {
        self.0.iter().rev().find_map(|seg| match seg {
            PathSegment::Key(k) => Some(k.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    /// Parse the dotted/bracketed form produced by `Display`, e.g.
    /// `clips[0].title`. Total: any input yields a path, unparseable
    /// bracket contents are kept as part of the key.
    pub fn parse(input: &str) -> FieldPath {
        let mut segments = Vec::new();
        for part in input.split('.') {
            if part.is_empty() {
                continue;
            }
            let mut rest = part;
            // Leading name before any bracket
            if let Some(open) = rest.find('[') {
                let (name, brackets) = rest.split_at(open);
                if !name.is_empty() {
                    segments.push(PathSegment::Key(name.to_string()));
                }
                rest = brackets;
            } else {
                segments.push(PathSegment::Key(rest.to_string()));
                continue;
            }
            // One or more [n] suffixes
            while let Some(close) = rest.find(']') {
                let inner = &rest[1..close];
                match inner.parse::<usize>() {
                    Ok(idx) => segments.push(PathSegment::Index(idx)),
                    Err(_) => segments.push(PathSegment::Key(inner.to_string())),
                }
                rest = &rest[close + 1..];
                if !rest.starts_with('[') {
                    break;
                }
            }
            // Leftover text, including an unterminated bracket, degrades
            // to a key segment rather than vanishing
            if !rest.is_empty() {
                segments.push(PathSegment::Key(rest.to_string()));
            }
        }
        FieldPath(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                PathSegment::Key(k) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", k)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Traversal output unit: one renderable field.
///
/// Borrows the originating node - descriptors live only as long as the
/// schema they were produced from, and a new set is produced per render
/// pass.
#[derive(Debug, Clone)]
pub struct FieldDescriptor<'a> {
    pub path: FieldPath,
    pub node: &'a SchemaNode,
    /// Resolved against the immediate parent's required set.
    pub required: bool,
    /// Nesting level: 0 for top-level properties, +1 per object level,
    /// +2 per array-of-objects level (array header plus item slot).
    pub depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_display_round_trip() {
        let path = FieldPath::root().child("clips").index(0).child("title");
        assert_eq!(path.to_string(), "clips[0].title");
        assert_eq!(FieldPath::parse("clips[0].title"), path);
    }

    #[test]
    fn path_parse_plain_keys() {
        let path = FieldPath::parse("address.city");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("address".to_string()),
                PathSegment::Key("city".to_string()),
            ]
        );
    }

    #[test]
    fn path_parse_is_total() {
        // Garbage bracket contents degrade to key segments, never panic
        let path = FieldPath::parse("a[x].b");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("a".to_string()),
                PathSegment::Key("x".to_string()),
                PathSegment::Key("b".to_string()),
            ]
        );
        assert!(FieldPath::parse("").is_empty());
    }

    #[test]
    fn unterminated_bracket_degrades_to_key() {
        let path = FieldPath::parse("clips[0");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("clips".to_string()),
                PathSegment::Key("[0".to_string()),
            ]
        );
    }

    #[test]
    fn field_name_skips_indexes() {
        let path = FieldPath::root().child("clips").index(2);
        assert_eq!(path.field_name(), Some("clips"));
    }
}
