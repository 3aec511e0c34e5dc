use std::sync::Arc;

use crate::{
    ast::field_map::FieldMap,
    execution::step_info::ExecutionStepInfo,
    response::{graphql_error::GraphQLError, value::Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchedValueType {
    Object,
    List,
    Scalar,
    Enum,
}

/// The next level to resolve: the fields selected on an object and the object itself.
#[derive(Debug, Clone)]
pub struct FieldSubSelection {
    pub source: Value,
    pub fields: Arc<FieldMap>,
    /// Step info of the object position, refined to its concrete type.
    pub step_info: Arc<ExecutionStepInfo>,
}

impl FieldSubSelection {
    pub fn concrete_type(&self) -> &str {
        self.step_info.output_type.named_type()
    }
}

/// Typed outcome of fetching a single field for a single source.
#[derive(Debug, Clone)]
pub struct FetchedValueAnalysis {
    pub value_type: FetchedValueType,
    /// Response key the value is stored under.
    pub name: String,
    pub is_null: bool,
    /// Serialized value of a scalar or enum. `Null` for other kinds.
    pub completed_value: Value,
    /// One analysis per list element, in order.
    /// Emptied once the list is turned into a result node.
    pub children: Vec<FetchedValueAnalysis>,
    pub field_sub_selection: Option<FieldSubSelection>,
    pub errors: Vec<GraphQLError>,
    pub step_info: Arc<ExecutionStepInfo>,
}

impl FetchedValueAnalysis {
    pub fn null(
        value_type: FetchedValueType,
        step_info: Arc<ExecutionStepInfo>,
        errors: Vec<GraphQLError>,
    ) -> Self {
        FetchedValueAnalysis {
            value_type,
            name: step_info.response_key().to_string(),
            is_null: true,
            completed_value: Value::Null,
            children: Vec::new(),
            field_sub_selection: None,
            errors,
            step_info,
        }
    }

    pub fn completed(
        value_type: FetchedValueType,
        completed_value: Value,
        step_info: Arc<ExecutionStepInfo>,
        errors: Vec<GraphQLError>,
    ) -> Self {
        FetchedValueAnalysis {
            value_type,
            name: step_info.response_key().to_string(),
            is_null: false,
            completed_value,
            children: Vec::new(),
            field_sub_selection: None,
            errors,
            step_info,
        }
    }

    pub fn list(
        children: Vec<FetchedValueAnalysis>,
        step_info: Arc<ExecutionStepInfo>,
        errors: Vec<GraphQLError>,
    ) -> Self {
        FetchedValueAnalysis {
            children,
            ..Self::completed(FetchedValueType::List, Value::Null, step_info, errors)
        }
    }

    pub fn object(sub_selection: FieldSubSelection, errors: Vec<GraphQLError>) -> Self {
        let step_info = sub_selection.step_info.clone();

        FetchedValueAnalysis {
            field_sub_selection: Some(sub_selection),
            ..Self::completed(FetchedValueType::Object, Value::Null, step_info, errors)
        }
    }
}
