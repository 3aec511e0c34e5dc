use indexmap::IndexMap;

use crate::ast::selection::FieldNode;

/// Response key to the same-named field nodes selected under it, in document order.
/// More than one node per key when fragments select the same key.
pub type FieldMap = IndexMap<String, Vec<FieldNode>>;

/// Hashable form of a [`FieldMap`], equal for two maps collected from the same field nodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldMapKey(Vec<(String, Vec<FieldNode>)>);

impl From<&FieldMap> for FieldMapKey {
    fn from(fields: &FieldMap) -> Self {
        FieldMapKey(
            fields
                .iter()
                .map(|(key, nodes)| (key.clone(), nodes.clone()))
                .collect(),
        )
    }
}
