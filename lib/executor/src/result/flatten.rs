use std::sync::Arc;

use crate::{
    execution::error::ExecutionError,
    response::{graphql_error::GraphQLError, value::Value},
    result::node::ResultNode,
};

/// Response data of a fully resolved tree.
///
/// Violation markers were settled when the tree was built, a node carrying one is `null`.
/// Nothing is classified here and the tree is left untouched.
pub fn flatten(node: &ResultNode) -> Result<Value, ExecutionError> {
    if node.violation().is_some() {
        return Ok(Value::Null);
    }

    match node {
        ResultNode::Leaf(leaf) => Ok(leaf.analysis.completed_value.clone()),
        ResultNode::List(list) => list
            .children
            .iter()
            .map(|child| flatten(child))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        ResultNode::Object(object) => flatten_fields(object.children.iter()),
        ResultNode::Root(root) => flatten_fields(root.children.iter()),
        ResultNode::UnresolvedObject(unresolved) => Err(ExecutionError::UnresolvedNodeInResult(
            unresolved.analysis.step_info.path.clone(),
        )),
    }
}

fn flatten_fields<'a>(
    children: impl Iterator<Item = (&'a String, &'a Arc<ResultNode>)>,
) -> Result<Value, ExecutionError> {
    children
        .map(|(key, child)| flatten(child).map(|value| (key.clone(), value)))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Object)
}

/// Field errors of the tree, depth-first, each node's errors before its descendants'.
pub fn collect_errors(node: &ResultNode) -> Vec<GraphQLError> {
    let mut errors = Vec::new();
    visit_errors(node, &mut errors);
    errors
}

fn visit_errors(node: &ResultNode, errors: &mut Vec<GraphQLError>) {
    if let Some(analysis) = node.analysis() {
        errors.extend(analysis.errors.iter().cloned());
    }

    match node {
        ResultNode::List(list) => list
            .children
            .iter()
            .for_each(|child| visit_errors(child, errors)),
        ResultNode::Object(object) => object
            .children
            .values()
            .for_each(|child| visit_errors(child, errors)),
        ResultNode::Root(root) => root
            .children
            .values()
            .for_each(|child| visit_errors(child, errors)),
        ResultNode::Leaf(_) | ResultNode::UnresolvedObject(_) => {}
    }
}
