use graphql_parser::query as parser;
use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::{ast::value::InputValue, response::graphql_error::GraphQLErrorLocation};

#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    pub items: Vec<Selection>,
}

#[derive(Clone, Debug)]
pub enum Selection {
    Field(FieldNode),
    InlineFragment(InlineFragmentNode),
    FragmentSpread(FragmentSpreadNode),
}

#[derive(Clone, Debug)]
pub struct InlineFragmentNode {
    pub type_condition: Option<String>,
    pub directives: Vec<DirectiveNode>,
    pub selection_set: SelectionSet,
}

#[derive(Clone, Debug)]
pub struct FragmentSpreadNode {
    pub fragment_name: String,
    pub directives: Vec<DirectiveNode>,
}

#[derive(Clone, Debug)]
pub struct DirectiveNode {
    pub name: String,
    pub arguments: Vec<(String, InputValue)>,
}

impl DirectiveNode {
    pub fn argument(&self, name: &str) -> Option<&InputValue> {
        self.arguments
            .iter()
            .find(|(arg_name, _)| arg_name == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug)]
struct FieldNodeInner {
    name: String,
    alias: Option<String>,
    location: GraphQLErrorLocation,
    arguments: Vec<(String, InputValue)>,
    directives: Vec<DirectiveNode>,
    selection_set: SelectionSet,
}

/// A field as it appears in the document.
///
/// Cloning shares the node. Two `FieldNode`s are equal only when they are the same
/// node of the same document, which makes them usable as part of a batching key.
#[derive(Clone, Debug)]
pub struct FieldNode(Arc<FieldNodeInner>);

impl FieldNode {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.0.alias.as_deref()
    }

    /// The key under which the field is stored in the response.
    pub fn response_key(&self) -> &str {
        self.0.alias.as_deref().unwrap_or(&self.0.name)
    }

    pub fn location(&self) -> GraphQLErrorLocation {
        self.0.location
    }

    pub fn arguments(&self) -> &[(String, InputValue)] {
        &self.0.arguments
    }

    pub fn directives(&self) -> &[DirectiveNode] {
        &self.0.directives
    }

    pub fn selection_set(&self) -> &SelectionSet {
        &self.0.selection_set
    }
}

impl PartialEq for FieldNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for FieldNode {}

impl Hash for FieldNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

fn convert_directives(directives: &[parser::Directive<'_, String>]) -> Vec<DirectiveNode> {
    directives
        .iter()
        .map(|directive| DirectiveNode {
            name: directive.name.clone(),
            arguments: directive
                .arguments
                .iter()
                .map(|(name, value)| (name.clone(), InputValue::from(value)))
                .collect(),
        })
        .collect()
}

impl From<&parser::Field<'_, String>> for FieldNode {
    fn from(field: &parser::Field<'_, String>) -> Self {
        FieldNode(Arc::new(FieldNodeInner {
            name: field.name.clone(),
            alias: field.alias.clone(),
            location: GraphQLErrorLocation {
                line: field.position.line,
                column: field.position.column,
            },
            arguments: field
                .arguments
                .iter()
                .map(|(name, value)| (name.clone(), InputValue::from(value)))
                .collect(),
            directives: convert_directives(&field.directives),
            selection_set: (&field.selection_set).into(),
        }))
    }
}

impl From<&parser::SelectionSet<'_, String>> for SelectionSet {
    fn from(selection_set: &parser::SelectionSet<'_, String>) -> Self {
        SelectionSet {
            items: selection_set.items.iter().map(Selection::from).collect(),
        }
    }
}

impl From<&parser::Selection<'_, String>> for Selection {
    fn from(selection: &parser::Selection<'_, String>) -> Self {
        match selection {
            parser::Selection::Field(field) => Selection::Field(field.into()),
            parser::Selection::InlineFragment(fragment) => {
                Selection::InlineFragment(InlineFragmentNode {
                    type_condition: fragment
                        .type_condition
                        .as_ref()
                        .map(|parser::TypeCondition::On(name)| name.clone()),
                    directives: convert_directives(&fragment.directives),
                    selection_set: (&fragment.selection_set).into(),
                })
            }
            parser::Selection::FragmentSpread(spread) => {
                Selection::FragmentSpread(FragmentSpreadNode {
                    fragment_name: spread.fragment_name.clone(),
                    directives: convert_directives(&spread.directives),
                })
            }
        }
    }
}
