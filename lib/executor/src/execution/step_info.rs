use std::sync::Arc;

use crate::{
    ast::selection::FieldNode,
    response::{graphql_error::GraphQLErrorLocation, path::ResponsePath, value::Value},
    schema::OutputType,
};

/// Describes one position of the response tree.
///
/// `path` always has as many segments as the position is deep, and `parent` links to the
/// position one level up (list positions included).
#[derive(Debug, Clone)]
pub struct ExecutionStepInfo {
    pub output_type: OutputType,
    /// Same-named field nodes selected at this position. Empty for the root.
    pub field_nodes: Vec<FieldNode>,
    /// Concrete object type that owns the field.
    pub parent_type: Option<String>,
    pub path: ResponsePath,
    pub arguments: Value,
    pub parent: Option<Arc<ExecutionStepInfo>>,
}

impl ExecutionStepInfo {
    pub fn root(root_type: &str) -> Self {
        ExecutionStepInfo {
            output_type: OutputType::non_null(OutputType::named(root_type)),
            field_nodes: Vec::new(),
            parent_type: None,
            path: ResponsePath::root(),
            arguments: Value::Null,
            parent: None,
        }
    }

    pub fn for_sub_field(
        parent: &Arc<ExecutionStepInfo>,
        response_key: &str,
        field_nodes: Vec<FieldNode>,
        field_type: OutputType,
        arguments: Value,
    ) -> Self {
        ExecutionStepInfo {
            output_type: field_type,
            field_nodes,
            parent_type: Some(parent.output_type.named_type().to_string()),
            path: parent.path.with_key(response_key),
            arguments,
            parent: Some(parent.clone()),
        }
    }

    pub fn for_list_element(parent: &Arc<ExecutionStepInfo>, index: usize) -> Self {
        let output_type = match parent.output_type.nullable() {
            OutputType::List(item) => (**item).clone(),
            other => other.clone(),
        };

        ExecutionStepInfo {
            output_type,
            field_nodes: parent.field_nodes.clone(),
            parent_type: parent.parent_type.clone(),
            path: parent.path.with_index(index),
            arguments: parent.arguments.clone(),
            parent: Some(parent.clone()),
        }
    }

    /// The same position, refined to a concrete object type.
    pub fn treat_as(&self, concrete_type: &str) -> Self {
        ExecutionStepInfo {
            output_type: self.output_type.with_named_type(concrete_type),
            ..self.clone()
        }
    }

    pub fn is_non_null(&self) -> bool {
        self.output_type.is_non_null()
    }

    pub fn field_name(&self) -> &str {
        self.field_nodes.first().map(|f| f.name()).unwrap_or_default()
    }

    pub fn response_key(&self) -> &str {
        self.field_nodes
            .first()
            .map(|f| f.response_key())
            .unwrap_or_default()
    }

    pub fn location(&self) -> Option<GraphQLErrorLocation> {
        self.field_nodes.first().map(|f| f.location())
    }

    /// `Parent.field`, as used in error messages.
    pub fn coordinate(&self) -> String {
        format!(
            "{}.{}",
            self.parent_type.as_deref().unwrap_or_default(),
            self.field_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        execution::step_info::ExecutionStepInfo, response::value::Value, schema::OutputType,
    };

    #[test]
    fn paths_grow_with_depth() {
        let root = Arc::new(ExecutionStepInfo::root("Query"));
        let users = Arc::new(ExecutionStepInfo::for_sub_field(
            &root,
            "users",
            vec![],
            OutputType::non_null(OutputType::list(OutputType::non_null(OutputType::named(
                "Node",
            )))),
            Value::Null,
        ));
        let element = ExecutionStepInfo::for_list_element(&users, 1);

        assert_eq!(root.path.len(), 0);
        assert_eq!(users.path.to_string(), "users");
        assert_eq!(users.parent_type.as_deref(), Some("Query"));
        assert_eq!(element.path.to_string(), "users.1");
        assert_eq!(element.output_type.to_string(), "Node!");
        assert!(element.is_non_null());
        assert_eq!(element.treat_as("User").output_type.to_string(), "User!");
        assert_eq!(element.parent.map(|p| p.path.len()), Some(1));
    }
}
