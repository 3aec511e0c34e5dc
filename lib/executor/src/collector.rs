use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    ast::{
        document::{FragmentNode, OperationDocument},
        field_map::FieldMap,
        selection::{DirectiveNode, Selection, SelectionSet},
        value::InputValue,
    },
    response::value::Value,
    schema::TypeSystem,
};

/// Merges selection sets into the fields that apply to one concrete object type.
pub trait FieldCollector: Send + Sync {
    fn collect_fields(
        &self,
        schema: &dyn TypeSystem,
        variables: &Value,
        object_type: &str,
        selection_sets: &[&SelectionSet],
    ) -> FieldMap;
}

/// Collects fields of an operation document, expanding its fragments and
/// honoring `@skip` and `@include`.
#[derive(Clone, Debug, Default)]
pub struct DocumentFieldCollector {
    fragments: Arc<HashMap<String, FragmentNode>>,
}

impl DocumentFieldCollector {
    pub fn new(document: &OperationDocument) -> Self {
        Self {
            fragments: Arc::new(document.fragments.clone()),
        }
    }

    fn collect_into(
        &self,
        schema: &dyn TypeSystem,
        variables: &Value,
        object_type: &str,
        selection_set: &SelectionSet,
        visited_fragments: &mut HashSet<String>,
        fields: &mut FieldMap,
    ) {
        for selection in &selection_set.items {
            match selection {
                Selection::Field(field) => {
                    if !should_include(field.directives(), variables) {
                        continue;
                    }
                    fields
                        .entry(field.response_key().to_string())
                        .or_default()
                        .push(field.clone());
                }
                Selection::InlineFragment(fragment) => {
                    if !should_include(&fragment.directives, variables)
                        || !does_fragment_type_apply(
                            schema,
                            object_type,
                            fragment.type_condition.as_deref(),
                        )
                    {
                        continue;
                    }
                    self.collect_into(
                        schema,
                        variables,
                        object_type,
                        &fragment.selection_set,
                        visited_fragments,
                        fields,
                    );
                }
                Selection::FragmentSpread(spread) => {
                    if !should_include(&spread.directives, variables)
                        || !visited_fragments.insert(spread.fragment_name.clone())
                    {
                        continue;
                    }
                    let Some(fragment) = self.fragments.get(&spread.fragment_name) else {
                        continue;
                    };
                    if !does_fragment_type_apply(
                        schema,
                        object_type,
                        Some(fragment.type_condition.as_str()),
                    ) {
                        continue;
                    }
                    self.collect_into(
                        schema,
                        variables,
                        object_type,
                        &fragment.selection_set,
                        visited_fragments,
                        fields,
                    );
                }
            }
        }
    }
}

impl FieldCollector for DocumentFieldCollector {
    fn collect_fields(
        &self,
        schema: &dyn TypeSystem,
        variables: &Value,
        object_type: &str,
        selection_sets: &[&SelectionSet],
    ) -> FieldMap {
        let mut fields = FieldMap::new();
        // Shared across the merged sets: a fragment is spread at most once per object.
        let mut visited_fragments = HashSet::new();

        for selection_set in selection_sets {
            self.collect_into(
                schema,
                variables,
                object_type,
                selection_set,
                &mut visited_fragments,
                &mut fields,
            );
        }

        fields
    }
}

fn directive_condition(directive: &DirectiveNode, variables: &Value) -> Option<bool> {
    match directive.argument("if")? {
        InputValue::Boolean(b) => Some(*b),
        InputValue::Variable(name) => variables.get(name).and_then(Value::as_bool),
        _ => None,
    }
}

fn should_include(directives: &[DirectiveNode], variables: &Value) -> bool {
    for directive in directives {
        match directive.name.as_str() {
            "skip" if directive_condition(directive, variables) == Some(true) => return false,
            "include" if directive_condition(directive, variables) == Some(false) => return false,
            _ => {}
        }
    }

    true
}

fn does_fragment_type_apply(
    schema: &dyn TypeSystem,
    object_type: &str,
    type_condition: Option<&str>,
) -> bool {
    match type_condition {
        None => true,
        Some(condition) if condition == object_type => true,
        Some(condition) => schema
            .type_kind(condition)
            .is_some_and(|kind| kind.is_abstract())
            && schema.is_possible_type(condition, object_type),
    }
}
