use async_trait::async_trait;

use crate::{
    resolvers::common::{BatchResolveParams, FetchResult, FieldResolver, ResolveParams},
    response::graphql_error::FieldError,
};

/// A resolver backed by a synchronous closure.
pub struct FnResolver<F> {
    resolve_fn: F,
}

impl<F> FnResolver<F>
where
    F: for<'a> Fn(ResolveParams<'a>) -> Result<FetchResult, FieldError> + Send + Sync,
{
    pub fn new(resolve_fn: F) -> Self {
        Self { resolve_fn }
    }
}

#[async_trait]
impl<F> FieldResolver for FnResolver<F>
where
    F: for<'a> Fn(ResolveParams<'a>) -> Result<FetchResult, FieldError> + Send + Sync,
{
    async fn resolve<'a>(&self, params: ResolveParams<'a>) -> Result<FetchResult, FieldError> {
        (self.resolve_fn)(params)
    }
}

/// A batching resolver backed by a synchronous closure.
pub struct BatchFnResolver<F> {
    resolve_fn: F,
}

impl<F> BatchFnResolver<F>
where
    F: for<'a> Fn(BatchResolveParams<'a>) -> Result<Vec<FetchResult>, FieldError> + Send + Sync,
{
    pub fn new(resolve_fn: F) -> Self {
        Self { resolve_fn }
    }
}

#[async_trait]
impl<F> FieldResolver for BatchFnResolver<F>
where
    F: for<'a> Fn(BatchResolveParams<'a>) -> Result<Vec<FetchResult>, FieldError> + Send + Sync,
{
    async fn resolve<'a>(&self, params: ResolveParams<'a>) -> Result<FetchResult, FieldError> {
        let mut results = (self.resolve_fn)(BatchResolveParams {
            sources: vec![params.source],
            arguments: params.arguments,
            variables: params.variables,
            step_infos: vec![params.step_info],
        })?;

        match results.len() {
            1 => Ok(results.remove(0)),
            actual => Err(FieldError::new(format!(
                "Batch resolver returned {} results for a single source",
                actual
            ))),
        }
    }

    fn supports_batching(&self) -> bool {
        true
    }

    async fn resolve_batch<'a>(
        &self,
        params: BatchResolveParams<'a>,
    ) -> Result<Vec<FetchResult>, FieldError> {
        (self.resolve_fn)(params)
    }
}
