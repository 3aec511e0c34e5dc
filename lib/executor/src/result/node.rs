use indexmap::IndexMap;
use std::sync::Arc;

use crate::{
    execution::{
        analysis::{FetchedValueAnalysis, FieldSubSelection},
        error::ExecutionError,
    },
    response::path::ResponsePath,
    result::zipper::NodePosition,
};

/// Marks a node that resolves to `null` because a non-null position under it
/// (or the node itself) has no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonNullViolation {
    /// Path of the non-null position that was null.
    pub path: ResponsePath,
    /// Whether the parent has to be nulled as well, true when the node's own position is non-null.
    pub propagates: bool,
}

/// Node of the immutable result tree.
///
/// Nodes are never changed in place. Replacing a child builds a new parent that shares
/// every other child with the old one.
#[derive(Debug, Clone)]
pub enum ResultNode {
    Leaf(LeafNode),
    List(ListNode),
    Object(ObjectNode),
    /// An object whose fields are fetched in a later round.
    UnresolvedObject(UnresolvedObjectNode),
    Root(RootNode),
}

#[derive(Debug, Clone)]
pub struct LeafNode {
    pub analysis: Arc<FetchedValueAnalysis>,
    pub violation: Option<NonNullViolation>,
}

#[derive(Debug, Clone)]
pub struct ListNode {
    pub analysis: Arc<FetchedValueAnalysis>,
    pub children: Vec<Arc<ResultNode>>,
    pub violation: Option<NonNullViolation>,
}

#[derive(Debug, Clone)]
pub struct ObjectNode {
    pub analysis: Arc<FetchedValueAnalysis>,
    pub children: IndexMap<String, Arc<ResultNode>>,
    pub violation: Option<NonNullViolation>,
}

#[derive(Debug, Clone)]
pub struct UnresolvedObjectNode {
    pub analysis: Arc<FetchedValueAnalysis>,
}

#[derive(Debug, Clone, Default)]
pub struct RootNode {
    pub children: IndexMap<String, Arc<ResultNode>>,
    pub violation: Option<NonNullViolation>,
}

/// First violation among `children` that reaches their parent.
fn container_violation<'a>(
    children: impl IntoIterator<Item = &'a Arc<ResultNode>>,
    is_non_null: bool,
) -> Option<NonNullViolation> {
    children
        .into_iter()
        .filter_map(|child| child.violation())
        .find(|violation| violation.propagates)
        .map(|violation| NonNullViolation {
            path: violation.path.clone(),
            propagates: is_non_null,
        })
}

impl LeafNode {
    pub fn new(analysis: Arc<FetchedValueAnalysis>) -> Self {
        let violation = (analysis.is_null && analysis.step_info.is_non_null()).then(|| {
            NonNullViolation {
                path: analysis.step_info.path.clone(),
                propagates: true,
            }
        });

        LeafNode {
            analysis,
            violation,
        }
    }
}

impl ListNode {
    pub fn new(analysis: Arc<FetchedValueAnalysis>, children: Vec<Arc<ResultNode>>) -> Self {
        let violation = container_violation(&children, analysis.step_info.is_non_null());

        ListNode {
            analysis,
            children,
            violation,
        }
    }
}

impl ObjectNode {
    pub fn new(
        analysis: Arc<FetchedValueAnalysis>,
        children: IndexMap<String, Arc<ResultNode>>,
    ) -> Self {
        let violation = container_violation(children.values(), analysis.step_info.is_non_null());

        ObjectNode {
            analysis,
            children,
            violation,
        }
    }
}

impl UnresolvedObjectNode {
    pub fn sub_selection(&self) -> Option<&FieldSubSelection> {
        self.analysis.field_sub_selection.as_ref()
    }
}

impl RootNode {
    pub fn new(children: IndexMap<String, Arc<ResultNode>>) -> Self {
        let violation = container_violation(children.values(), true);

        RootNode {
            children,
            violation,
        }
    }
}

impl ResultNode {
    pub fn analysis(&self) -> Option<&Arc<FetchedValueAnalysis>> {
        match self {
            ResultNode::Leaf(node) => Some(&node.analysis),
            ResultNode::List(node) => Some(&node.analysis),
            ResultNode::Object(node) => Some(&node.analysis),
            ResultNode::UnresolvedObject(node) => Some(&node.analysis),
            ResultNode::Root(_) => None,
        }
    }

    pub fn violation(&self) -> Option<&NonNullViolation> {
        match self {
            ResultNode::Leaf(node) => node.violation.as_ref(),
            ResultNode::List(node) => node.violation.as_ref(),
            ResultNode::Object(node) => node.violation.as_ref(),
            ResultNode::UnresolvedObject(_) => None,
            ResultNode::Root(node) => node.violation.as_ref(),
        }
    }

    pub fn path(&self) -> ResponsePath {
        self.analysis()
            .map(|analysis| analysis.step_info.path.clone())
            .unwrap_or_default()
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResultNode::UnresolvedObject(_))
    }

    pub fn child(&self, position: &NodePosition) -> Option<&Arc<ResultNode>> {
        match (self, position) {
            (ResultNode::List(node), NodePosition::Index(index)) => node.children.get(*index),
            (ResultNode::Object(node), NodePosition::Key(key)) => node.children.get(key),
            (ResultNode::Root(node), NodePosition::Key(key)) => node.children.get(key),
            _ => None,
        }
    }

    pub fn with_child(
        &self,
        position: NodePosition,
        child: Arc<ResultNode>,
    ) -> Result<ResultNode, ExecutionError> {
        self.with_new_children(vec![(position, child)])
    }

    /// A copy of this container with the children at the given positions replaced.
    /// Non-null violations are computed again from the new set of children.
    pub fn with_new_children(
        &self,
        replacements: Vec<(NodePosition, Arc<ResultNode>)>,
    ) -> Result<ResultNode, ExecutionError> {
        match self {
            ResultNode::List(node) => {
                let mut children = node.children.clone();
                for (position, child) in replacements {
                    match position {
                        NodePosition::Index(index) if index < children.len() => {
                            children[index] = child;
                        }
                        other => {
                            return Err(ExecutionError::InvalidChildPosition(other.to_string()))
                        }
                    }
                }
                Ok(ResultNode::List(ListNode::new(node.analysis.clone(), children)))
            }
            ResultNode::Object(node) => {
                let children = replace_keyed(&node.children, replacements)?;
                Ok(ResultNode::Object(ObjectNode::new(node.analysis.clone(), children)))
            }
            ResultNode::Root(node) => {
                let children = replace_keyed(&node.children, replacements)?;
                Ok(ResultNode::Root(RootNode::new(children)))
            }
            ResultNode::Leaf(_) | ResultNode::UnresolvedObject(_) => {
                match replacements.into_iter().next() {
                    Some((position, _)) => {
                        Err(ExecutionError::InvalidChildPosition(position.to_string()))
                    }
                    None => Ok(self.clone()),
                }
            }
        }
    }
}

fn replace_keyed(
    children: &IndexMap<String, Arc<ResultNode>>,
    replacements: Vec<(NodePosition, Arc<ResultNode>)>,
) -> Result<IndexMap<String, Arc<ResultNode>>, ExecutionError> {
    let mut children = children.clone();
    for (position, child) in replacements {
        let slot = match &position {
            NodePosition::Key(key) => children.get_mut(key),
            NodePosition::Index(_) => None,
        };
        match slot {
            Some(slot) => *slot = child,
            None => return Err(ExecutionError::InvalidChildPosition(position.to_string())),
        }
    }
    Ok(children)
}
