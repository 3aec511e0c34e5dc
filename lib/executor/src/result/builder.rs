use indexmap::IndexMap;
use std::sync::Arc;

use crate::{
    execution::analysis::{FetchedValueAnalysis, FetchedValueType},
    result::node::{LeafNode, ListNode, ObjectNode, ResultNode, RootNode, UnresolvedObjectNode},
};

/// Turns an analysis into the node stored at its position.
///
/// Nulls of any kind become leaves, carrying a violation when the position is non-null.
/// Objects stay unresolved until the driver fetches their fields.
pub fn build_result_node(mut analysis: FetchedValueAnalysis) -> ResultNode {
    if analysis.is_null {
        return ResultNode::Leaf(LeafNode::new(Arc::new(analysis)));
    }

    match analysis.value_type {
        FetchedValueType::Object => ResultNode::UnresolvedObject(UnresolvedObjectNode {
            analysis: Arc::new(analysis),
        }),
        FetchedValueType::List => {
            let children = std::mem::take(&mut analysis.children)
                .into_iter()
                .map(|child| Arc::new(build_result_node(child)))
                .collect();
            ResultNode::List(ListNode::new(Arc::new(analysis), children))
        }
        FetchedValueType::Scalar | FetchedValueType::Enum => {
            ResultNode::Leaf(LeafNode::new(Arc::new(analysis)))
        }
    }
}

fn build_children(fields: Vec<FetchedValueAnalysis>) -> IndexMap<String, Arc<ResultNode>> {
    fields
        .into_iter()
        .map(|field| (field.name.clone(), Arc::new(build_result_node(field))))
        .collect()
}

/// Resolved form of an unresolved object, one analysis per field in field order.
pub fn build_object_node(
    analysis: Arc<FetchedValueAnalysis>,
    fields: Vec<FetchedValueAnalysis>,
) -> ObjectNode {
    ObjectNode::new(analysis, build_children(fields))
}

pub fn build_root_node(fields: Vec<FetchedValueAnalysis>) -> RootNode {
    RootNode::new(build_children(fields))
}
