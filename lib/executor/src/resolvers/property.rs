use async_trait::async_trait;

use crate::{
    resolvers::common::{FetchResult, FieldResolver, ResolveParams},
    response::{graphql_error::FieldError, value::Value},
};

/// Reads the field, by its name, from the parent value.
/// A missing property resolves to `null`.
pub struct PropertyResolver;

#[async_trait]
impl FieldResolver for PropertyResolver {
    async fn resolve<'a>(&self, params: ResolveParams<'a>) -> Result<FetchResult, FieldError> {
        let value = params
            .source
            .get(params.step_info.field_name())
            .cloned()
            .unwrap_or(Value::Null);

        Ok(value.into())
    }
}
