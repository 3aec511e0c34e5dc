pub mod document;
pub mod field_map;
pub mod selection;
pub mod value;

pub use document::{OperationDocument, OperationKind};
pub use field_map::{FieldMap, FieldMapKey};
pub use selection::{FieldNode, Selection, SelectionSet};
pub use value::InputValue;
