use std::{fmt::Display, sync::Arc};

use crate::{execution::error::ExecutionError, result::node::ResultNode};

/// Where a node is attached in its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodePosition {
    Key(String),
    Index(usize),
}

impl Display for NodePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodePosition::Key(key) => write!(f, "{}", key),
            NodePosition::Index(index) => write!(f, "{}", index),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Breadcrumb {
    pub node: Arc<ResultNode>,
    pub position: NodePosition,
}

/// Cursor on a node of the tree, with the way back to the root.
#[derive(Debug, Clone)]
pub struct ResultNodeZipper {
    pub current: Arc<ResultNode>,
    /// Immediate parent first, root last.
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl ResultNodeZipper {
    pub fn new(root: Arc<ResultNode>) -> Self {
        ResultNodeZipper {
            current: root,
            breadcrumbs: Vec::new(),
        }
    }

    pub fn root(&self) -> &Arc<ResultNode> {
        self.breadcrumbs
            .last()
            .map(|breadcrumb| &breadcrumb.node)
            .unwrap_or(&self.current)
    }

    /// Moves the cursor to a child of the current node.
    pub fn child(&self, position: NodePosition) -> Result<Self, ExecutionError> {
        let child = self
            .current
            .child(&position)
            .cloned()
            .ok_or_else(|| ExecutionError::InvalidChildPosition(position.to_string()))?;

        let mut breadcrumbs = Vec::with_capacity(self.breadcrumbs.len() + 1);
        breadcrumbs.push(Breadcrumb {
            node: self.current.clone(),
            position,
        });
        breadcrumbs.extend(self.breadcrumbs.iter().cloned());

        Ok(ResultNodeZipper {
            current: child,
            breadcrumbs,
        })
    }

    /// The same cursor pointing at a replacement of the current node.
    pub fn with_current(&self, node: Arc<ResultNode>) -> Self {
        ResultNodeZipper {
            current: node,
            breadcrumbs: self.breadcrumbs.clone(),
        }
    }

    /// Positions from the root down to the current node.
    pub fn positions(&self) -> Vec<NodePosition> {
        self.breadcrumbs
            .iter()
            .rev()
            .map(|breadcrumb| breadcrumb.position.clone())
            .collect()
    }

    /// Rebuilds the path to the root around the current node.
    /// Only the ancestors of the current node are reallocated.
    pub fn to_root_node(&self) -> Result<Arc<ResultNode>, ExecutionError> {
        self.breadcrumbs
            .iter()
            .try_fold(self.current.clone(), |child, breadcrumb| {
                breadcrumb
                    .node
                    .with_child(breadcrumb.position.clone(), child)
                    .map(Arc::new)
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        response::value::Value,
        result::{
            builder::build_root_node,
            node::ResultNode,
            test_nodes::{list, object, resolved, scalar},
            zipper::{NodePosition, ResultNodeZipper},
        },
    };

    fn key(key: &str) -> NodePosition {
        NodePosition::Key(key.to_string())
    }

    #[test]
    /**
     * Rebuilding from a cursor reallocates only the path to the root.
     */
    fn rebuild_shares_untouched_subtrees() {
        let root = Arc::new(ResultNode::Root(build_root_node(vec![
            list("users", "[User]", vec![object("users.0", "User"), object("users.1", "User")]),
            scalar("count", "Int", Value::I64(2)),
        ])));

        let cursor = ResultNodeZipper::new(root.clone())
            .child(key("users"))
            .and_then(|zipper| zipper.child(NodePosition::Index(1)))
            .expect("valid positions");
        assert_eq!(cursor.positions(), vec![key("users"), NodePosition::Index(1)]);
        assert!(Arc::ptr_eq(cursor.root(), &root));

        let replacement = resolved(object("users.1", "User"), vec![]);
        let rebuilt = cursor
            .with_current(replacement.clone())
            .to_root_node()
            .expect("rebuilt");

        let users = rebuilt.child(&key("users")).expect("users");
        let old_users = root.child(&key("users")).expect("users");
        assert!(Arc::ptr_eq(
            users.child(&NodePosition::Index(1)).expect("element"),
            &replacement
        ));
        assert!(Arc::ptr_eq(
            users.child(&NodePosition::Index(0)).expect("element"),
            old_users.child(&NodePosition::Index(0)).expect("element"),
        ));
        assert!(Arc::ptr_eq(
            rebuilt.child(&key("count")).expect("count"),
            root.child(&key("count")).expect("count"),
        ));
        assert!(root
            .child(&key("users"))
            .and_then(|users| users.child(&NodePosition::Index(1)))
            .is_some_and(|node| node.is_unresolved()));
    }

    #[test]
    fn moving_to_a_missing_child_fails() {
        let root = Arc::new(ResultNode::Root(build_root_node(vec![])));

        assert!(ResultNodeZipper::new(root).child(key("nope")).is_err());
    }
}
