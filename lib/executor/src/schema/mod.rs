pub mod scalars;
pub mod sdl;

use graphql_parser::query::Type as ParserType;
use std::fmt::{self, Display};

use crate::{
    ast::{document::OperationKind, selection::FieldNode, value::InputValue},
    execution::step_info::ExecutionStepInfo,
    response::value::Value,
    schema::scalars::serialize_builtin_scalar,
    utils::consts::TYPENAME_FIELD_NAME,
    variables::value_from_ast,
};

pub use sdl::SdlSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Interface,
    Union,
    Scalar,
    Enum,
    InputObject,
}

impl TypeKind {
    pub fn is_abstract(&self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Union)
    }
}

/// Declared type of an output position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputType {
    Named(String),
    List(Box<OutputType>),
    NonNull(Box<OutputType>),
}

impl OutputType {
    pub fn named(name: impl Into<String>) -> Self {
        OutputType::Named(name.into())
    }

    pub fn list(item: OutputType) -> Self {
        OutputType::List(Box::new(item))
    }

    pub fn non_null(inner: OutputType) -> Self {
        OutputType::NonNull(Box::new(inner))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, OutputType::NonNull(_))
    }

    /// The type without its outermost non-null wrapper.
    pub fn nullable(&self) -> &OutputType {
        match self {
            OutputType::NonNull(inner) => inner,
            other => other,
        }
    }

    /// The innermost named type.
    pub fn named_type(&self) -> &str {
        match self {
            OutputType::Named(name) => name,
            OutputType::List(inner) | OutputType::NonNull(inner) => inner.named_type(),
        }
    }

    /// Same wrappers around another named type.
    pub fn with_named_type(&self, name: &str) -> OutputType {
        match self {
            OutputType::Named(_) => OutputType::Named(name.to_string()),
            OutputType::List(inner) => OutputType::list(inner.with_named_type(name)),
            OutputType::NonNull(inner) => OutputType::non_null(inner.with_named_type(name)),
        }
    }
}

impl Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputType::Named(name) => write!(f, "{}", name),
            OutputType::List(inner) => write!(f, "[{}]", inner),
            OutputType::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

impl From<&ParserType<'_, String>> for OutputType {
    fn from(value: &ParserType<'_, String>) -> Self {
        match value {
            ParserType::NamedType(name) => OutputType::Named(name.clone()),
            ParserType::ListType(inner) => OutputType::list(OutputType::from(&**inner)),
            ParserType::NonNullType(inner) => OutputType::non_null(OutputType::from(&**inner)),
        }
    }
}

/// What the engine needs to know about the schema.
///
/// The required methods describe the type graph. The provided methods implement
/// the default GraphQL coercion rules and can be overridden for custom scalars,
/// enums and abstract type resolution.
pub trait TypeSystem: Send + Sync {
    fn type_kind(&self, type_name: &str) -> Option<TypeKind>;

    fn field_type(&self, parent_type: &str, field_name: &str) -> Option<OutputType>;

    /// Whether `object_type` is a member of the interface or union `abstract_type`.
    fn is_possible_type(&self, abstract_type: &str, object_type: &str) -> bool;

    fn root_type(&self, operation: OperationKind) -> Option<&str>;

    fn argument_defaults(&self, _parent_type: &str, _field_name: &str) -> Vec<(String, Value)> {
        Vec::new()
    }

    fn coerce_arguments(
        &self,
        parent_type: &str,
        field: &FieldNode,
        variables: &Value,
    ) -> Result<Value, String> {
        let mut arguments: Vec<(String, Value)> = Vec::with_capacity(field.arguments().len());

        for (name, value) in field.arguments() {
            // An argument bound to an absent variable counts as not provided.
            if let InputValue::Variable(variable) = value {
                if variables.get(variable).is_none() {
                    continue;
                }
            }
            arguments.push((name.clone(), value_from_ast(value, variables)));
        }

        for (name, default_value) in self.argument_defaults(parent_type, field.name()) {
            if !arguments.iter().any(|(provided, _)| provided == &name) {
                arguments.push((name, default_value));
            }
        }

        Ok(Value::Object(arguments))
    }

    /// Concrete object type of a value at an interface or union position.
    fn resolve_concrete_type(
        &self,
        abstract_type: &str,
        value: &Value,
        _step_info: &ExecutionStepInfo,
    ) -> Option<String> {
        let type_name = value.get(TYPENAME_FIELD_NAME)?.as_str()?;
        self.is_possible_type(abstract_type, type_name)
            .then(|| type_name.to_string())
    }

    fn serialize_scalar(&self, scalar_type: &str, value: &Value) -> Result<Value, String> {
        serialize_builtin_scalar(scalar_type, value).unwrap_or_else(|| Ok(value.clone()))
    }

    fn serialize_enum(&self, enum_type: &str, value: &Value) -> Result<Value, String> {
        match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(format!(
                "Enum \"{}\" cannot represent non-string value: {}",
                enum_type, other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use graphql_parser::query::Type;

    use crate::schema::OutputType;

    #[test]
    fn converts_and_displays_wrapped_types() {
        let parsed: Type<'_, String> = Type::NonNullType(Box::new(Type::ListType(Box::new(
            Type::NonNullType(Box::new(Type::NamedType("Node".to_string()))),
        ))));
        let output_type = OutputType::from(&parsed);

        assert_eq!(output_type.to_string(), "[Node!]!");
        assert!(output_type.is_non_null());
        assert!(!output_type.nullable().is_non_null());
        assert_eq!(output_type.named_type(), "Node");
        assert_eq!(output_type.with_named_type("User").to_string(), "[User!]!");
    }
}
