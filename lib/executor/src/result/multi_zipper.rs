use indexmap::IndexMap;
use std::sync::Arc;

use crate::{
    execution::error::ExecutionError,
    result::{
        node::ResultNode,
        zipper::{NodePosition, ResultNodeZipper},
    },
};

/// Zippers sharing one root, committed together.
///
/// Every replacement is applied against the same original root. Edits below a common
/// ancestor are merged into a single rebuild of that ancestor, so no edit overwrites another.
#[derive(Debug, Clone)]
pub struct MultiZipper {
    common_root: Arc<ResultNode>,
    zippers: Vec<ResultNodeZipper>,
}

struct Edit<'a> {
    positions: &'a [NodePosition],
    depth: usize,
    replacement: &'a Arc<ResultNode>,
}

impl MultiZipper {
    pub fn new(
        common_root: Arc<ResultNode>,
        zippers: Vec<ResultNodeZipper>,
    ) -> Result<Self, ExecutionError> {
        ensure_common_root(&common_root, &zippers)?;

        Ok(MultiZipper {
            common_root,
            zippers,
        })
    }

    pub fn common_root(&self) -> &Arc<ResultNode> {
        &self.common_root
    }

    pub fn zippers(&self) -> &[ResultNodeZipper] {
        &self.zippers
    }

    /// Swaps the zippers, typically for the same cursors pointing at replaced nodes.
    pub fn with_zippers(self, zippers: Vec<ResultNodeZipper>) -> Result<Self, ExecutionError> {
        Self::new(self.common_root, zippers)
    }

    /// The tree with the current node of every zipper in place.
    pub fn to_root_node(&self) -> Result<Arc<ResultNode>, ExecutionError> {
        if self.zippers.is_empty() {
            return Ok(self.common_root.clone());
        }

        let positions: Vec<Vec<NodePosition>> =
            self.zippers.iter().map(|zipper| zipper.positions()).collect();
        let edits = positions
            .iter()
            .zip(&self.zippers)
            .map(|(positions, zipper)| Edit {
                positions: positions.as_slice(),
                depth: 0,
                replacement: &zipper.current,
            })
            .collect();

        apply_edits(&self.common_root, edits)
    }
}

fn ensure_common_root(
    common_root: &Arc<ResultNode>,
    zippers: &[ResultNodeZipper],
) -> Result<(), ExecutionError> {
    if zippers
        .iter()
        .all(|zipper| Arc::ptr_eq(zipper.root(), common_root) || zipper.breadcrumbs.is_empty())
    {
        Ok(())
    } else {
        Err(ExecutionError::StaleZipper)
    }
}

fn describe(positions: &[NodePosition]) -> String {
    if positions.is_empty() {
        return "<root>".to_string();
    }

    positions
        .iter()
        .map(|position| position.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

fn apply_edits(
    node: &Arc<ResultNode>,
    edits: Vec<Edit<'_>>,
) -> Result<Arc<ResultNode>, ExecutionError> {
    if let Some(edit) = edits.iter().find(|edit| edit.depth == edit.positions.len()) {
        if edits.len() > 1 {
            return Err(ExecutionError::ConflictingReplacement(describe(
                &edit.positions[..edit.depth],
            )));
        }
        return Ok(edit.replacement.clone());
    }

    let mut by_child: IndexMap<&NodePosition, Vec<Edit<'_>>> = IndexMap::new();
    for edit in edits {
        let positions = edit.positions;
        by_child
            .entry(&positions[edit.depth])
            .or_default()
            .push(Edit {
                depth: edit.depth + 1,
                ..edit
            });
    }

    let mut replacements = Vec::with_capacity(by_child.len());
    for (position, child_edits) in by_child {
        let child = node
            .child(position)
            .ok_or_else(|| ExecutionError::InvalidChildPosition(position.to_string()))?;
        replacements.push((position.clone(), apply_edits(child, child_edits)?));
    }

    node.with_new_children(replacements).map(Arc::new)
}
