// Schema traversal core: turns a JSON-Schema-shaped document into an
// ordered sequence of field descriptors for a viewer or an editable form.
//
// The traversal is deliberately permissive: malformed or partially
// specified schema fragments degrade to opaque leaves instead of failing,
// so a hand-authored process schema can never crash a render pass.
pub mod node;
pub mod traverse;
pub mod types;
pub mod values;

pub use traverse::traverse;
pub use types::{FieldDescriptor, FieldPath, PathSegment, SchemaKind, SchemaNode};
pub use values::{apply_change, resolve_value, value_at};
