use futures::{stream, FutureExt, StreamExt};
use std::{any::Any, future::Future, panic::AssertUnwindSafe, sync::Arc};
use tracing::{debug, instrument, trace};

use crate::{
    ast::selection::FieldNode,
    context::ExecutionContext,
    execution::{
        analysis::FetchedValueAnalysis,
        analyzer::{FetchedValue, FetchedValueAnalyzer},
        error::ExecutionError,
        step_info::ExecutionStepInfo,
    },
    resolvers::common::{BatchResolveParams, FetchResult, FieldResolverBoxedArc, ResolveParams},
    response::{
        error_normalization::{error_at, to_absolute_error},
        graphql_error::{FieldError, GraphQLErrorKind},
        value::Value,
    },
    schema::OutputType,
    utils::consts::TYPENAME_FIELD_NAME,
};

/// An object whose field is fetched, and the step info of the object position.
#[derive(Clone, Copy)]
pub struct FetchTarget<'a> {
    pub source: &'a Value,
    pub step_info: &'a Arc<ExecutionStepInfo>,
}

/// Fetches one field for a set of sibling objects and analyzes the outcomes.
pub struct FieldFetcher<'exec> {
    ctx: ExecutionContext<'exec>,
    analyzer: FetchedValueAnalyzer<'exec>,
}

impl<'exec> FieldFetcher<'exec> {
    pub fn new(ctx: ExecutionContext<'exec>) -> Self {
        Self {
            ctx,
            analyzer: FetchedValueAnalyzer::new(ctx),
        }
    }

    /// One analysis per target, in the order of the targets.
    ///
    /// Failures of single invocations end up as field errors on their position.
    /// Only a broken collaborator contract fails the whole fetch.
    #[instrument(level = "trace", skip_all, fields(
        parent_type = parent_type,
        response_key = response_key,
        sources = targets.len(),
    ))]
    pub async fn fetch_field(
        &self,
        parent_type: &str,
        response_key: &str,
        field_nodes: &[FieldNode],
        targets: &[FetchTarget<'_>],
    ) -> Result<Vec<FetchedValueAnalysis>, ExecutionError> {
        let field = field_nodes
            .first()
            .ok_or_else(|| ExecutionError::EmptyFieldNodes(response_key.to_string()))?;

        if field.name() == TYPENAME_FIELD_NAME {
            let typename_type = OutputType::non_null(OutputType::named("String"));
            return targets
                .iter()
                .map(|target| {
                    let step_info = Arc::new(ExecutionStepInfo::for_sub_field(
                        target.step_info,
                        response_key,
                        field_nodes.to_vec(),
                        typename_type.clone(),
                        Value::Null,
                    ));
                    self.analyzer.analyze(Value::from(parent_type).into(), step_info)
                })
                .collect();
        }

        let field_type = self
            .ctx
            .schema
            .field_type(parent_type, field.name())
            .ok_or_else(|| ExecutionError::UnknownField {
                parent_type: parent_type.to_string(),
                field: field.name().to_string(),
            })?;
        let arguments = self
            .ctx
            .schema
            .coerce_arguments(parent_type, field, self.ctx.variables);

        let step_infos: Vec<Arc<ExecutionStepInfo>> = targets
            .iter()
            .map(|target| {
                Arc::new(ExecutionStepInfo::for_sub_field(
                    target.step_info,
                    response_key,
                    field_nodes.to_vec(),
                    field_type.clone(),
                    arguments.as_ref().cloned().unwrap_or_default(),
                ))
            })
            .collect();

        let fetched = match arguments {
            Ok(arguments) => {
                let resolver = self.ctx.resolvers.get(parent_type, field.name());
                self.invoke_resolver(resolver, targets, &step_infos, &arguments)
                    .await?
            }
            Err(message) => step_infos
                .iter()
                .map(|step_info| FetchedValue {
                    value: Value::Null,
                    errors: vec![error_at(
                        message.clone(),
                        &step_info.path,
                        step_info.location(),
                        GraphQLErrorKind::ArgumentCoercion,
                    )],
                })
                .collect(),
        };

        fetched
            .into_iter()
            .zip(step_infos)
            .map(|(fetched, step_info)| self.analyzer.analyze(fetched, step_info))
            .collect()
    }

    async fn invoke_resolver(
        &self,
        resolver: &FieldResolverBoxedArc,
        targets: &[FetchTarget<'_>],
        step_infos: &[Arc<ExecutionStepInfo>],
        arguments: &Value,
    ) -> Result<Vec<FetchedValue>, ExecutionError> {
        if resolver.supports_batching() {
            trace!(sources = targets.len(), "invoking batch resolver");
            let outcome = self
                .guard(resolver.resolve_batch(BatchResolveParams {
                    sources: targets.iter().map(|target| target.source).collect(),
                    arguments,
                    variables: self.ctx.variables,
                    step_infos: step_infos.iter().map(|step_info| step_info.as_ref()).collect(),
                }))
                .await;

            return match outcome {
                Ok(results) if results.len() == targets.len() => Ok(results
                    .into_iter()
                    .zip(step_infos)
                    .map(|(result, step_info)| fetched_from_result(result, step_info))
                    .collect()),
                Ok(results) => Err(ExecutionError::BatchSizeMismatch {
                    field: step_infos
                        .first()
                        .map(|step_info| step_info.coordinate())
                        .unwrap_or_default(),
                    expected: targets.len(),
                    actual: results.len(),
                }),
                Err(error) => Ok(step_infos
                    .iter()
                    .map(|step_info| fetched_from_error(error.clone(), step_info))
                    .collect()),
            };
        }

        let outcomes: Vec<Result<FetchResult, FieldError>> = stream::iter(targets.iter().zip(step_infos))
            .map(|(target, step_info)| {
                trace!(path = %step_info.path, "invoking resolver");
                self.guard(resolver.resolve(ResolveParams {
                    source: target.source,
                    arguments,
                    variables: self.ctx.variables,
                    step_info,
                }))
            })
            .buffered(self.ctx.config.max_concurrent_resolvers.max(1))
            .collect()
            .await;

        Ok(outcomes
            .into_iter()
            .zip(step_infos)
            .map(|(outcome, step_info)| match outcome {
                Ok(result) => fetched_from_result(result, step_info),
                Err(error) => fetched_from_error(error, step_info),
            })
            .collect())
    }

    /// Turns a panic of the resolver into a field error, when configured to.
    async fn guard<T>(
        &self,
        invocation: impl Future<Output = Result<T, FieldError>>,
    ) -> Result<T, FieldError> {
        if !self.ctx.config.catch_resolver_panics {
            return invocation.await;
        }

        match AssertUnwindSafe(invocation).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => Err(FieldError::new(format!(
                "Resolver panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return message.to_string();
    }

    payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

fn fetched_from_result(result: FetchResult, step_info: &ExecutionStepInfo) -> FetchedValue {
    FetchedValue {
        value: result.data,
        errors: result
            .errors
            .into_iter()
            .map(|error| {
                to_absolute_error(
                    error,
                    &step_info.path,
                    step_info.location(),
                    GraphQLErrorKind::DataFetching,
                )
            })
            .collect(),
    }
}

/// A failed invocation leaves `null` at the position, with the error anchored at the field.
fn fetched_from_error(error: FieldError, step_info: &ExecutionStepInfo) -> FetchedValue {
    debug!(
        field = %step_info.coordinate(),
        path = %step_info.path,
        error = %error,
        "resolver failed"
    );

    let error = if error.locations.is_none() {
        error.with_locations(Vec::new())
    } else {
        error
    };

    FetchedValue {
        value: Value::Null,
        errors: vec![to_absolute_error(
            error,
            &step_info.path,
            step_info.location(),
            GraphQLErrorKind::DataFetching,
        )],
    }
}
