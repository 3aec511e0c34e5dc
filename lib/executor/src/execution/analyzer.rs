use std::sync::Arc;

use crate::{
    ast::{field_map::FieldMap, selection::SelectionSet},
    context::ExecutionContext,
    execution::{
        analysis::{FetchedValueAnalysis, FetchedValueType, FieldSubSelection},
        error::ExecutionError,
        step_info::ExecutionStepInfo,
    },
    response::{
        error_normalization::error_at,
        graphql_error::{GraphQLError, GraphQLErrorKind},
        value::Value,
    },
    schema::{OutputType, TypeKind},
};

/// A resolved value together with the errors its resolver reported, already absolute.
#[derive(Debug, Clone, Default)]
pub struct FetchedValue {
    pub value: Value,
    pub errors: Vec<GraphQLError>,
}

impl From<Value> for FetchedValue {
    fn from(value: Value) -> Self {
        FetchedValue {
            value,
            errors: Vec::new(),
        }
    }
}

/// Classifies fetched values against the type expected at their position.
/// Never performs I/O, objects are only prepared for the next round.
pub struct FetchedValueAnalyzer<'exec> {
    ctx: ExecutionContext<'exec>,
}

impl<'exec> FetchedValueAnalyzer<'exec> {
    pub fn new(ctx: ExecutionContext<'exec>) -> Self {
        Self { ctx }
    }

    pub fn analyze(
        &self,
        fetched: FetchedValue,
        step_info: Arc<ExecutionStepInfo>,
    ) -> Result<FetchedValueAnalysis, ExecutionError> {
        self.analyze_value(fetched.value, fetched.errors, step_info)
    }

    fn analyze_value(
        &self,
        value: Value,
        errors: Vec<GraphQLError>,
        step_info: Arc<ExecutionStepInfo>,
    ) -> Result<FetchedValueAnalysis, ExecutionError> {
        if let OutputType::List(_) = step_info.output_type.nullable() {
            return self.analyze_list(value, errors, step_info);
        }

        let type_name = step_info.output_type.named_type();
        match self.ctx.schema.type_kind(type_name) {
            Some(TypeKind::Scalar) => Ok(self.analyze_leaf(
                value,
                errors,
                step_info,
                FetchedValueType::Scalar,
            )),
            Some(TypeKind::Enum) => {
                Ok(self.analyze_leaf(value, errors, step_info, FetchedValueType::Enum))
            }
            Some(kind @ (TypeKind::Object | TypeKind::Interface | TypeKind::Union)) => {
                self.analyze_object(value, errors, step_info, kind)
            }
            Some(TypeKind::InputObject) | None => {
                Err(ExecutionError::UnknownType(type_name.to_string()))
            }
        }
    }

    fn analyze_list(
        &self,
        value: Value,
        mut errors: Vec<GraphQLError>,
        step_info: Arc<ExecutionStepInfo>,
    ) -> Result<FetchedValueAnalysis, ExecutionError> {
        match value {
            Value::Null => Ok(FetchedValueAnalysis::null(
                FetchedValueType::List,
                step_info,
                errors,
            )),
            Value::Array(items) => {
                let children = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let item_info =
                            Arc::new(ExecutionStepInfo::for_list_element(&step_info, index));
                        self.analyze_value(item, Vec::new(), item_info)
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(FetchedValueAnalysis::list(children, step_info, errors))
            }
            other => {
                errors.push(error_at(
                    format!(
                        "Expected a list, but got {} for field \"{}\"",
                        other.type_name(),
                        step_info.coordinate()
                    ),
                    &step_info.path,
                    step_info.location(),
                    GraphQLErrorKind::TypeMismatch,
                ));

                Ok(FetchedValueAnalysis::null(
                    FetchedValueType::List,
                    step_info,
                    errors,
                ))
            }
        }
    }

    fn analyze_leaf(
        &self,
        value: Value,
        mut errors: Vec<GraphQLError>,
        step_info: Arc<ExecutionStepInfo>,
        value_type: FetchedValueType,
    ) -> FetchedValueAnalysis {
        if value.is_null() {
            return FetchedValueAnalysis::null(value_type, step_info, errors);
        }

        let type_name = step_info.output_type.named_type();
        let serialized = match value_type {
            FetchedValueType::Enum => self.ctx.schema.serialize_enum(type_name, &value),
            _ => self.ctx.schema.serialize_scalar(type_name, &value),
        };

        match serialized {
            // NaN has no representation in the response.
            Ok(completed) if completed.is_nan() => {
                FetchedValueAnalysis::null(value_type, step_info, errors)
            }
            Ok(completed) => FetchedValueAnalysis::completed(value_type, completed, step_info, errors),
            Err(message) => {
                errors.push(error_at(
                    message,
                    &step_info.path,
                    step_info.location(),
                    GraphQLErrorKind::Serialization,
                ));
                FetchedValueAnalysis::null(value_type, step_info, errors)
            }
        }
    }

    fn analyze_object(
        &self,
        value: Value,
        mut errors: Vec<GraphQLError>,
        step_info: Arc<ExecutionStepInfo>,
        kind: TypeKind,
    ) -> Result<FetchedValueAnalysis, ExecutionError> {
        if value.is_null() {
            return Ok(FetchedValueAnalysis::null(
                FetchedValueType::Object,
                step_info,
                errors,
            ));
        }

        let declared_type = step_info.output_type.named_type();
        let concrete_type = if kind.is_abstract() {
            self.ctx
                .schema
                .resolve_concrete_type(declared_type, &value, &step_info)
        } else {
            Some(declared_type.to_string())
        };

        let Some(concrete_type) = concrete_type else {
            errors.push(error_at(
                format!(
                    "Abstract type \"{}\" must resolve to an Object type at runtime for field \"{}\"",
                    declared_type,
                    step_info.coordinate()
                ),
                &step_info.path,
                step_info.location(),
                GraphQLErrorKind::UnresolvedType,
            ));
            return Ok(FetchedValueAnalysis::null(
                FetchedValueType::Object,
                step_info,
                errors,
            ));
        };

        let object_info = Arc::new(step_info.treat_as(&concrete_type));
        let fields = self.collect_sub_fields(&object_info, &concrete_type);

        Ok(FetchedValueAnalysis::object(
            FieldSubSelection {
                source: value,
                fields: Arc::new(fields),
                step_info: object_info,
            },
            errors,
        ))
    }

    fn collect_sub_fields(
        &self,
        object_info: &ExecutionStepInfo,
        concrete_type: &str,
    ) -> FieldMap {
        let selection_sets: Vec<&SelectionSet> = object_info
            .field_nodes
            .iter()
            .map(|field| field.selection_set())
            .collect();

        self.ctx.collector.collect_fields(
            self.ctx.schema,
            self.ctx.variables,
            concrete_type,
            &selection_sets,
        )
    }
}
