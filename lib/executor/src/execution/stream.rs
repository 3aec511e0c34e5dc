use futures::Stream;
use tracing::debug;

use crate::{
    execution::{analysis::FieldSubSelection, error::ExecutionError, strategy::ExecutionStrategy},
    response::{
        path::{PathSegment, ResponsePath},
        value::Value,
    },
    result::{node::ResultNode, traverse::collect_leaves},
};

/// A final value of the response and where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultLeaf {
    pub path: ResponsePath,
    pub value: Value,
}

impl From<&ResultNode> for ResultLeaf {
    fn from(node: &ResultNode) -> Self {
        let value = match node {
            ResultNode::Leaf(leaf) => leaf.analysis.completed_value.clone(),
            ResultNode::List(list) if list.children.is_empty() => Value::Array(Vec::new()),
            _ => Value::Null,
        };

        ResultLeaf {
            path: node.path(),
            value,
        }
    }
}

/// Emits the leaves of the response as the levels of the tree get resolved.
/// Nulls do not propagate to their parents here.
pub fn resolve_leaves<'a>(
    strategy: &'a ExecutionStrategy<'a>,
    root: FieldSubSelection,
    serial: bool,
) -> impl Stream<Item = Result<ResultLeaf, ExecutionError>> + 'a {
    async_stream::try_stream! {
        let mut tree = strategy.resolve_root(&root, serial).await?;
        for leaf in collect_leaves(&tree) {
            yield ResultLeaf::from(leaf.as_ref());
        }

        let mut rounds = 0;
        while let Some(round) = strategy.resolve_round(&tree).await? {
            rounds += 1;
            strategy.ensure_round_limit(rounds)?;
            debug!(round = rounds, objects = round.resolved.len(), "streaming resolved level");

            for node in &round.resolved {
                for leaf in collect_leaves(node) {
                    yield ResultLeaf::from(leaf.as_ref());
                }
            }
            tree = round.root;
        }
    }
}

/// Stores `value` at `path` in `data`, creating the objects and lists on the way.
/// Lists are padded with nulls up to the index.
pub fn insert_leaf(data: &mut Value, path: &ResponsePath, value: Value) {
    insert_at(data, path.segments(), value);
}

fn insert_at(target: &mut Value, segments: &[PathSegment], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *target = value;
        return;
    };

    match segment {
        PathSegment::Key(key) => {
            if !target.is_object() {
                *target = Value::Object(Vec::new());
            }
            if let Value::Object(entries) = target {
                let position = match entries.iter().position(|(k, _)| k == key) {
                    Some(position) => position,
                    None => {
                        entries.push((key.clone(), Value::Null));
                        entries.len() - 1
                    }
                };
                insert_at(&mut entries[position].1, rest, value);
            }
        }
        PathSegment::Index(index) => {
            if !matches!(target, Value::Array(_)) {
                *target = Value::Array(Vec::new());
            }
            if let Value::Array(items) = target {
                if items.len() <= *index {
                    items.resize(*index + 1, Value::Null);
                }
                insert_at(&mut items[*index], rest, value);
            }
        }
    }
}
