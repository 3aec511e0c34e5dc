use graphql_parser::query::{self as parser, parse_query};
use std::{collections::HashMap, fmt::Display};

use crate::ast::{selection::SelectionSet, value::InputValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
            OperationKind::Subscription => write!(f, "subscription"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VariableDefinition {
    pub name: String,
    pub default_value: Option<InputValue>,
}

#[derive(Debug, Clone)]
pub struct OperationNode {
    pub name: Option<String>,
    pub kind: OperationKind,
    pub variable_definitions: Vec<VariableDefinition>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone)]
pub struct FragmentNode {
    pub name: String,
    pub type_condition: String,
    pub selection_set: SelectionSet,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to parse document: {0}")]
    Parse(String),
    #[error("Operation '{0}' is not defined in the document")]
    UnknownOperation(String),
    #[error("Document defines multiple operations, an operation name is required")]
    AmbiguousOperation,
    #[error("Document does not define any operation")]
    NoOperation,
}

/// An executable document, detached from the source text it was parsed from.
#[derive(Debug, Clone, Default)]
pub struct OperationDocument {
    pub operations: Vec<OperationNode>,
    pub fragments: HashMap<String, FragmentNode>,
}

impl OperationDocument {
    pub fn parse(source: &str) -> Result<Self, DocumentError> {
        let document =
            parse_query::<String>(source).map_err(|e| DocumentError::Parse(e.to_string()))?;

        Ok(document.into())
    }

    /// Picks the operation to run: by name when given, otherwise the single one.
    pub fn operation(&self, operation_name: Option<&str>) -> Result<&OperationNode, DocumentError> {
        match operation_name {
            Some(name) => self
                .operations
                .iter()
                .find(|op| op.name.as_deref() == Some(name))
                .ok_or_else(|| DocumentError::UnknownOperation(name.to_string())),
            None => match self.operations.as_slice() {
                [] => Err(DocumentError::NoOperation),
                [single] => Ok(single),
                _ => Err(DocumentError::AmbiguousOperation),
            },
        }
    }
}

impl From<parser::Document<'_, String>> for OperationDocument {
    fn from(document: parser::Document<'_, String>) -> Self {
        let mut operations = Vec::new();
        let mut fragments = HashMap::new();

        for definition in &document.definitions {
            match definition {
                parser::Definition::Operation(operation) => operations.push(operation.into()),
                parser::Definition::Fragment(fragment) => {
                    let parser::TypeCondition::On(type_condition) = &fragment.type_condition;
                    fragments.insert(
                        fragment.name.clone(),
                        FragmentNode {
                            name: fragment.name.clone(),
                            type_condition: type_condition.clone(),
                            selection_set: (&fragment.selection_set).into(),
                        },
                    );
                }
            }
        }

        OperationDocument {
            operations,
            fragments,
        }
    }
}

fn convert_variables(definitions: &[parser::VariableDefinition<'_, String>]) -> Vec<VariableDefinition> {
    definitions
        .iter()
        .map(|definition| VariableDefinition {
            name: definition.name.clone(),
            default_value: definition.default_value.as_ref().map(InputValue::from),
        })
        .collect()
}

impl From<&parser::OperationDefinition<'_, String>> for OperationNode {
    fn from(value: &parser::OperationDefinition<'_, String>) -> Self {
        match value {
            parser::OperationDefinition::SelectionSet(s) => OperationNode {
                name: None,
                kind: OperationKind::Query,
                variable_definitions: vec![],
                selection_set: s.into(),
            },
            parser::OperationDefinition::Query(query) => OperationNode {
                name: query.name.clone(),
                kind: OperationKind::Query,
                variable_definitions: convert_variables(&query.variable_definitions),
                selection_set: (&query.selection_set).into(),
            },
            parser::OperationDefinition::Mutation(mutation) => OperationNode {
                name: mutation.name.clone(),
                kind: OperationKind::Mutation,
                variable_definitions: convert_variables(&mutation.variable_definitions),
                selection_set: (&mutation.selection_set).into(),
            },
            parser::OperationDefinition::Subscription(subscription) => OperationNode {
                name: subscription.name.clone(),
                kind: OperationKind::Subscription,
                variable_definitions: convert_variables(&subscription.variable_definitions),
                selection_set: (&subscription.selection_set).into(),
            },
        }
    }
}
