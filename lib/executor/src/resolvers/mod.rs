pub mod common;
pub mod function;
pub mod map;
pub mod property;

pub use common::{
    BatchResolveParams, FetchResult, FieldResolver, FieldResolverBoxedArc, ResolveParams,
};
pub use function::{BatchFnResolver, FnResolver};
pub use map::ResolverMap;
pub use property::PropertyResolver;
