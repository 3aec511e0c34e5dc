pub mod ast;
pub mod collector;
pub mod context;
pub mod execution;
pub mod resolvers;
pub mod response;
pub mod result;
pub mod schema;
pub mod utils;
pub mod variables;

#[cfg(test)]
mod tests;

pub use ast::document::{OperationDocument, OperationKind};
pub use collector::{DocumentFieldCollector, FieldCollector};
pub use context::ExecutionContext;
pub use execution::{
    error::ExecutionError,
    plan::{
        execute_operation, execute_sub_selection, root_sub_selection, OperationRequest,
        TreeExecutor,
    },
    stream::{insert_leaf, ResultLeaf},
};
pub use resolvers::{
    BatchFnResolver, BatchResolveParams, FetchResult, FieldResolver, FnResolver,
    PropertyResolver, ResolveParams, ResolverMap,
};
pub use response::{
    graphql_error::{FieldError, GraphQLError, GraphQLErrorKind, GraphQLErrorLocation},
    path::{PathSegment, ResponsePath},
    response::ExecutionResponse,
    value::Value,
};
pub use schema::{OutputType, SdlSchema, TypeKind, TypeSystem};
