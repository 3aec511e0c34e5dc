use std::collections::HashMap;

use crate::resolvers::{
    common::{FieldResolver, FieldResolverBoxedArc},
    property::PropertyResolver,
};

/// Resolvers by parent type and field name.
/// Fields without a registered resolver use the fallback, a [`PropertyResolver`] unless replaced.
pub struct ResolverMap {
    inner: HashMap<String, HashMap<String, FieldResolverBoxedArc>>,
    fallback: FieldResolverBoxedArc,
}

impl Default for ResolverMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverMap {
    pub fn new() -> Self {
        ResolverMap {
            inner: HashMap::new(),
            fallback: PropertyResolver.to_boxed_arc(),
        }
    }

    pub fn insert_boxed_arc(
        &mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        boxed_arc: FieldResolverBoxedArc,
    ) {
        self.inner
            .entry(type_name.into())
            .or_default()
            .insert(field_name.into(), boxed_arc);
    }

    pub fn insert<R>(&mut self, type_name: impl Into<String>, field_name: impl Into<String>, resolver: R)
    where
        R: FieldResolver + Send + Sync + 'static,
    {
        self.insert_boxed_arc(type_name, field_name, resolver.to_boxed_arc());
    }

    pub fn with_fallback(mut self, fallback: FieldResolverBoxedArc) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn get(&self, type_name: &str, field_name: &str) -> &FieldResolverBoxedArc {
        self.inner
            .get(type_name)
            .and_then(|fields| fields.get(field_name))
            .unwrap_or(&self.fallback)
    }

    pub fn contains(&self, type_name: &str, field_name: &str) -> bool {
        self.inner
            .get(type_name)
            .is_some_and(|fields| fields.contains_key(field_name))
    }
}
