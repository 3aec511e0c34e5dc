use futures::Stream;
use hive_tree_executor_config::execution::ExecutionConfig;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{
    ast::{
        document::{OperationDocument, OperationKind},
        selection::SelectionSet,
    },
    collector::DocumentFieldCollector,
    context::ExecutionContext,
    execution::{
        analysis::FieldSubSelection,
        error::ExecutionError,
        step_info::ExecutionStepInfo,
        strategy::{ExecutionStrategy, ResolvedTree},
        stream::{resolve_leaves, ResultLeaf},
    },
    resolvers::map::ResolverMap,
    response::{response::ExecutionResponse, value::Value},
    result::flatten::{collect_errors, flatten},
    schema::TypeSystem,
    variables::collect_variables,
};

/// Resolves sub-selections into responses.
pub struct TreeExecutor<'exec> {
    ctx: ExecutionContext<'exec>,
    strategy: ExecutionStrategy<'exec>,
}

impl<'exec> TreeExecutor<'exec> {
    pub fn new(ctx: ExecutionContext<'exec>) -> Self {
        Self {
            ctx,
            strategy: ExecutionStrategy::new(ctx),
        }
    }

    pub fn context(&self) -> ExecutionContext<'exec> {
        self.ctx
    }

    /// Resolves the fields of `root` against its source, top-level fields concurrently.
    pub async fn resolve(&self, root: FieldSubSelection) -> Result<ExecutionResponse, ExecutionError> {
        self.execute(root, OperationKind::Query).await
    }

    /// Like [`TreeExecutor::resolve`], top-level fields of mutations are resolved one at a time.
    #[instrument(level = "debug", skip_all, fields(operation = %kind, root_type = root.concrete_type()))]
    pub async fn execute(
        &self,
        root: FieldSubSelection,
        kind: OperationKind,
    ) -> Result<ExecutionResponse, ExecutionError> {
        let tree = self.resolve_tree(&root, kind).await?;
        let data = flatten(&tree.root)?;
        let errors = collect_errors(&tree.root);

        debug!(
            iterations = tree.iterations,
            errors = errors.len(),
            "execution completed"
        );

        Ok(ExecutionResponse { data, errors })
    }

    /// The resolved tree, before it is flattened.
    pub async fn resolve_tree(
        &self,
        root: &FieldSubSelection,
        kind: OperationKind,
    ) -> Result<ResolvedTree, ExecutionError> {
        self.strategy
            .execute(root, kind == OperationKind::Mutation)
            .await
    }

    /// The leaves of the response, level by level.
    pub fn resolve_leaves(
        &self,
        root: FieldSubSelection,
    ) -> impl Stream<Item = Result<ResultLeaf, ExecutionError>> + '_ {
        resolve_leaves(&self.strategy, root, false)
    }
}

/// The root position of an operation.
pub fn root_sub_selection(
    ctx: ExecutionContext<'_>,
    root_type: &str,
    root_value: Value,
    selection_set: &SelectionSet,
) -> FieldSubSelection {
    let fields = ctx
        .collector
        .collect_fields(ctx.schema, ctx.variables, root_type, &[selection_set]);

    FieldSubSelection {
        source: root_value,
        fields: Arc::new(fields),
        step_info: Arc::new(ExecutionStepInfo::root(root_type)),
    }
}

pub async fn execute_sub_selection(
    ctx: ExecutionContext<'_>,
    root: FieldSubSelection,
) -> Result<ExecutionResponse, ExecutionError> {
    TreeExecutor::new(ctx).resolve(root).await
}

pub struct OperationRequest<'a> {
    pub document: &'a OperationDocument,
    pub operation_name: Option<&'a str>,
    pub root_value: Value,
    pub variables: Option<Value>,
}

/// Runs an operation of `request.document`: picks the operation, fills in variable
/// defaults, collects the root fields and resolves them.
pub async fn execute_operation(
    schema: &dyn TypeSystem,
    resolvers: &ResolverMap,
    config: &ExecutionConfig,
    request: OperationRequest<'_>,
) -> Result<ExecutionResponse, ExecutionError> {
    let operation = request
        .document
        .operation(request.operation_name)
        .map_err(|e| ExecutionError::Document(e.to_string()))?;
    let root_type = schema
        .root_type(operation.kind)
        .ok_or(ExecutionError::MissingRootType(operation.kind))?;

    let variables = collect_variables(operation, request.variables);
    let collector = DocumentFieldCollector::new(request.document);
    let ctx = ExecutionContext::new(schema, &collector, resolvers, &variables, config);
    let root = root_sub_selection(ctx, root_type, request.root_value, &operation.selection_set);

    TreeExecutor::new(ctx).execute(root, operation.kind).await
}
