use std::sync::Arc;

use crate::result::{
    node::ResultNode,
    zipper::{Breadcrumb, NodePosition, ResultNodeZipper},
};

/// Zippers on every unresolved object of the tree, depth-first.
/// Object children are visited in field order, list children in index order.
pub fn collect_unresolved(root: &Arc<ResultNode>) -> Vec<ResultNodeZipper> {
    let mut found = Vec::new();
    let mut ancestors = Vec::new();
    visit_unresolved(root, &mut ancestors, &mut found);
    found
}

/// `ancestors` is ordered from the root down to the parent of `node`.
fn visit_unresolved(
    node: &Arc<ResultNode>,
    ancestors: &mut Vec<Breadcrumb>,
    found: &mut Vec<ResultNodeZipper>,
) {
    match node.as_ref() {
        ResultNode::UnresolvedObject(_) => found.push(ResultNodeZipper {
            current: node.clone(),
            breadcrumbs: ancestors.iter().rev().cloned().collect(),
        }),
        ResultNode::Leaf(_) => {}
        ResultNode::List(list) => {
            for (index, child) in list.children.iter().enumerate() {
                ancestors.push(Breadcrumb {
                    node: node.clone(),
                    position: NodePosition::Index(index),
                });
                visit_unresolved(child, ancestors, found);
                ancestors.pop();
            }
        }
        ResultNode::Object(object) => visit_keyed(node, object.children.iter(), ancestors, found),
        ResultNode::Root(root) => visit_keyed(node, root.children.iter(), ancestors, found),
    }
}

fn visit_keyed<'a>(
    node: &Arc<ResultNode>,
    children: impl Iterator<Item = (&'a String, &'a Arc<ResultNode>)>,
    ancestors: &mut Vec<Breadcrumb>,
    found: &mut Vec<ResultNodeZipper>,
) {
    for (key, child) in children {
        ancestors.push(Breadcrumb {
            node: node.clone(),
            position: NodePosition::Key(key.clone()),
        });
        visit_unresolved(child, ancestors, found);
        ancestors.pop();
    }
}

/// Nodes of a subtree that end up as values in the response: leaves and empty lists.
/// Unresolved objects are not descended into.
pub fn collect_leaves(node: &Arc<ResultNode>) -> Vec<Arc<ResultNode>> {
    let mut leaves = Vec::new();
    visit_leaves(node, &mut leaves);
    leaves
}

fn visit_leaves(node: &Arc<ResultNode>, leaves: &mut Vec<Arc<ResultNode>>) {
    match node.as_ref() {
        ResultNode::Leaf(_) => leaves.push(node.clone()),
        ResultNode::List(list) if list.children.is_empty() => leaves.push(node.clone()),
        ResultNode::List(list) => list
            .children
            .iter()
            .for_each(|child| visit_leaves(child, leaves)),
        ResultNode::Object(object) => object
            .children
            .values()
            .for_each(|child| visit_leaves(child, leaves)),
        ResultNode::Root(root) => root
            .children
            .values()
            .for_each(|child| visit_leaves(child, leaves)),
        ResultNode::UnresolvedObject(_) => {}
    }
}
