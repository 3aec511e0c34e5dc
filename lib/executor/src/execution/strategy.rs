use futures::future::try_join_all;
use hive_tree_executor_config::execution::ExecutionStrategyKind;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{
    ast::field_map::FieldMapKey,
    context::ExecutionContext,
    execution::{
        analysis::{FetchedValueAnalysis, FieldSubSelection},
        error::ExecutionError,
        fetch::{FetchTarget, FieldFetcher},
    },
    result::{
        builder::{build_object_node, build_root_node},
        multi_zipper::MultiZipper,
        node::{ResultNode, UnresolvedObjectNode},
        traverse::collect_unresolved,
    },
};

/// A fully resolved tree and the number of fetch iterations it took, the root fetch included.
#[derive(Debug, Clone)]
pub struct ResolvedTree {
    pub root: Arc<ResultNode>,
    pub iterations: usize,
}

/// Outcome of one round: the new tree and the objects resolved in it.
#[derive(Debug, Clone)]
pub struct ResolvedRound {
    pub root: Arc<ResultNode>,
    pub resolved: Vec<Arc<ResultNode>>,
}

/// Expands the result tree level by level.
///
/// Every round collects the unresolved objects of the tree, fetches their fields group
/// by group and grafts the resolved objects back in a single commit.
pub struct ExecutionStrategy<'exec> {
    ctx: ExecutionContext<'exec>,
    fetcher: FieldFetcher<'exec>,
}

impl<'exec> ExecutionStrategy<'exec> {
    pub fn new(ctx: ExecutionContext<'exec>) -> Self {
        Self {
            ctx,
            fetcher: FieldFetcher::new(ctx),
        }
    }

    pub async fn execute(
        &self,
        root: &FieldSubSelection,
        serial: bool,
    ) -> Result<ResolvedTree, ExecutionError> {
        let mut tree = self.resolve_root(root, serial).await?;
        let mut rounds = 0;

        while let Some(round) = self.resolve_round(&tree).await? {
            rounds += 1;
            self.ensure_round_limit(rounds)?;
            tree = round.root;
        }

        Ok(ResolvedTree {
            root: tree,
            iterations: rounds + 1,
        })
    }

    /// Root node with the top-level fields fetched.
    /// In serial mode the fields are fetched one after another, in field order.
    #[instrument(level = "debug", skip_all, fields(root_type = root.concrete_type(), serial = serial))]
    pub async fn resolve_root(
        &self,
        root: &FieldSubSelection,
        serial: bool,
    ) -> Result<Arc<ResultNode>, ExecutionError> {
        let fields = if serial {
            self.fetch_serially(root).await?
        } else {
            self.fetch_group(&[root]).await?.pop().unwrap_or_default()
        };

        Ok(Arc::new(ResultNode::Root(build_root_node(fields))))
    }

    /// Resolves every object left unresolved in `tree`.
    /// Returns `None` once nothing is left to resolve.
    pub async fn resolve_round(
        &self,
        tree: &Arc<ResultNode>,
    ) -> Result<Option<ResolvedRound>, ExecutionError> {
        let zippers = collect_unresolved(tree);
        if zippers.is_empty() {
            return Ok(None);
        }

        let multi = MultiZipper::new(tree.clone(), zippers)?;
        let resolved = self.resolve_objects(&multi).await?;

        let zippers = multi
            .zippers()
            .iter()
            .zip(&resolved)
            .map(|(zipper, node)| zipper.with_current(node.clone()))
            .collect();
        let root = multi.with_zippers(zippers)?.to_root_node()?;

        Ok(Some(ResolvedRound { root, resolved }))
    }

    pub fn ensure_round_limit(&self, rounds: usize) -> Result<(), ExecutionError> {
        let limit = self.ctx.config.max_resolution_rounds;
        if rounds > limit {
            return Err(ExecutionError::IterationLimitExceeded(limit));
        }
        Ok(())
    }

    /// Resolved object nodes, in the order of the zippers.
    async fn resolve_objects(
        &self,
        multi: &MultiZipper,
    ) -> Result<Vec<Arc<ResultNode>>, ExecutionError> {
        let unresolved = multi
            .zippers()
            .iter()
            .map(|zipper| match zipper.current.as_ref() {
                ResultNode::UnresolvedObject(node) => Ok(node),
                other => Err(ExecutionError::InvalidChildPosition(other.path().to_string())),
            })
            .collect::<Result<Vec<&UnresolvedObjectNode>, _>>()?;
        let sub_selections = unresolved
            .iter()
            .map(|node| {
                node.sub_selection().ok_or_else(|| {
                    ExecutionError::MissingSubSelection(node.analysis.step_info.path.clone())
                })
            })
            .collect::<Result<Vec<&FieldSubSelection>, _>>()?;

        let groups = self.group(&sub_selections);
        debug!(
            unresolved = sub_selections.len(),
            groups = groups.len(),
            "resolving round"
        );

        let group_results = try_join_all(groups.iter().map(|indices| {
            let members: Vec<&FieldSubSelection> =
                indices.iter().map(|index| sub_selections[*index]).collect();
            async move { self.fetch_group(&members).await }
        }))
        .await?;

        let mut resolved: Vec<Option<Arc<ResultNode>>> = vec![None; unresolved.len()];
        for (indices, results) in groups.iter().zip(group_results) {
            for (index, fields) in indices.iter().zip(results) {
                let analysis = unresolved[*index].analysis.clone();
                resolved[*index] = Some(Arc::new(ResultNode::Object(build_object_node(
                    analysis, fields,
                ))));
            }
        }

        resolved
            .into_iter()
            .zip(&unresolved)
            .map(|(node, unresolved)| {
                node.ok_or_else(|| {
                    ExecutionError::MissingSubSelection(unresolved.analysis.step_info.path.clone())
                })
            })
            .collect()
    }

    /// Indices of `sub_selections` that are fetched together.
    fn group(&self, sub_selections: &[&FieldSubSelection]) -> Vec<Vec<usize>> {
        match self.ctx.config.strategy {
            ExecutionStrategyKind::PerObject => {
                (0..sub_selections.len()).map(|index| vec![index]).collect()
            }
            ExecutionStrategyKind::Batched => {
                let mut groups: IndexMap<(&str, FieldMapKey), Vec<usize>> = IndexMap::new();
                for (index, sub_selection) in sub_selections.iter().enumerate() {
                    groups
                        .entry((
                            sub_selection.concrete_type(),
                            FieldMapKey::from(sub_selection.fields.as_ref()),
                        ))
                        .or_default()
                        .push(index);
                }
                groups.into_values().collect()
            }
        }
    }

    /// Fetches the fields of objects sharing the same field map.
    /// Returns, per member, one analysis per field in field order.
    #[instrument(level = "debug", skip_all, fields(
        parent_type = members.first().map(|m| m.concrete_type()),
        members = members.len(),
    ))]
    async fn fetch_group(
        &self,
        members: &[&FieldSubSelection],
    ) -> Result<Vec<Vec<FetchedValueAnalysis>>, ExecutionError> {
        let Some(first) = members.first() else {
            return Ok(Vec::new());
        };
        let parent_type = first.concrete_type();
        let targets: Vec<FetchTarget<'_>> = members
            .iter()
            .map(|member| FetchTarget {
                source: &member.source,
                step_info: &member.step_info,
            })
            .collect();

        let per_field = try_join_all(first.fields.iter().map(|(response_key, field_nodes)| {
            self.fetcher
                .fetch_field(parent_type, response_key, field_nodes, &targets)
        }))
        .await?;

        let mut per_member: Vec<Vec<FetchedValueAnalysis>> = members
            .iter()
            .map(|_| Vec::with_capacity(first.fields.len()))
            .collect();
        for analyses in per_field {
            for (member, analysis) in per_member.iter_mut().zip(analyses) {
                member.push(analysis);
            }
        }

        Ok(per_member)
    }

    async fn fetch_serially(
        &self,
        root: &FieldSubSelection,
    ) -> Result<Vec<FetchedValueAnalysis>, ExecutionError> {
        let target = [FetchTarget {
            source: &root.source,
            step_info: &root.step_info,
        }];
        let mut fields = Vec::with_capacity(root.fields.len());

        for (response_key, field_nodes) in root.fields.iter() {
            let analyses = self
                .fetcher
                .fetch_field(root.concrete_type(), response_key, field_nodes, &target)
                .await?;
            fields.extend(analyses);
        }

        Ok(fields)
    }
}
