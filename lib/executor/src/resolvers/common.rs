use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    execution::step_info::ExecutionStepInfo,
    response::{graphql_error::FieldError, value::Value},
};

/// Raw outcome of a field resolver: the value plus errors reported on the side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FetchResult {
    pub data: Value,
    pub errors: Vec<FieldError>,
}

impl FetchResult {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_error(mut self, error: FieldError) -> Self {
        self.errors.push(error);
        self
    }
}

impl From<Value> for FetchResult {
    fn from(data: Value) -> Self {
        FetchResult::new(data)
    }
}

pub struct ResolveParams<'a> {
    pub source: &'a Value,
    pub arguments: &'a Value,
    pub variables: &'a Value,
    pub step_info: &'a ExecutionStepInfo,
}

/// Every source shares the field and its arguments.
/// `step_infos[i]` is the position `sources[i]` will be stored at.
pub struct BatchResolveParams<'a> {
    pub sources: Vec<&'a Value>,
    pub arguments: &'a Value,
    pub variables: &'a Value,
    pub step_infos: Vec<&'a ExecutionStepInfo>,
}

#[async_trait]
pub trait FieldResolver {
    async fn resolve<'a>(&self, params: ResolveParams<'a>) -> Result<FetchResult, FieldError>;

    /// When `true`, the engine calls [`FieldResolver::resolve_batch`] once for all
    /// sources of a group instead of calling [`FieldResolver::resolve`] per source.
    fn supports_batching(&self) -> bool {
        false
    }

    /// Must return exactly one result per source, in the order of the sources.
    async fn resolve_batch<'a>(
        &self,
        params: BatchResolveParams<'a>,
    ) -> Result<Vec<FetchResult>, FieldError> {
        let mut results = Vec::with_capacity(params.sources.len());
        for (source, step_info) in params.sources.into_iter().zip(params.step_infos) {
            let result = self
                .resolve(ResolveParams {
                    source,
                    arguments: params.arguments,
                    variables: params.variables,
                    step_info,
                })
                .await?;
            results.push(result);
        }
        Ok(results)
    }

    fn to_boxed_arc<'a>(self) -> Arc<Box<dyn FieldResolver + Send + Sync + 'a>>
    where
        Self: Sized + Send + Sync + 'a,
    {
        Arc::new(Box::new(self))
    }
}

pub type FieldResolverType = dyn crate::resolvers::common::FieldResolver + Send + Sync;

pub type FieldResolverBoxedArc = Arc<Box<FieldResolverType>>;
