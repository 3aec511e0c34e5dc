use hive_tree_executor_config::execution::ExecutionConfig;

use crate::{
    collector::FieldCollector, resolvers::map::ResolverMap, response::value::Value,
    schema::TypeSystem,
};

/// Everything an execution reads and never changes.
#[derive(Clone, Copy)]
pub struct ExecutionContext<'exec> {
    pub schema: &'exec dyn TypeSystem,
    pub collector: &'exec dyn FieldCollector,
    pub resolvers: &'exec ResolverMap,
    pub variables: &'exec Value,
    pub config: &'exec ExecutionConfig,
}

impl<'exec> ExecutionContext<'exec> {
    pub fn new(
        schema: &'exec dyn TypeSystem,
        collector: &'exec dyn FieldCollector,
        resolvers: &'exec ResolverMap,
        variables: &'exec Value,
        config: &'exec ExecutionConfig,
    ) -> Self {
        ExecutionContext {
            schema,
            collector,
            resolvers,
            variables,
            config,
        }
    }
}
