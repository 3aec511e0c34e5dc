use graphql_parser::schema::{self as parser, parse_schema};
use std::collections::{HashMap, HashSet};

use crate::{
    ast::{document::OperationKind, value::InputValue},
    response::value::Value,
    schema::{OutputType, TypeKind, TypeSystem},
    variables::value_from_ast,
};

static BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to parse schema: {0}")]
    Parse(String),
}

#[derive(Debug)]
struct FieldDefinition {
    field_type: OutputType,
    argument_defaults: Vec<(String, Value)>,
}

#[derive(Debug)]
struct TypeDefinition {
    kind: TypeKind,
    fields: HashMap<String, FieldDefinition>,
    possible_types: HashSet<String>,
    enum_values: HashSet<String>,
}

impl TypeDefinition {
    fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            fields: HashMap::new(),
            possible_types: HashSet::new(),
            enum_values: HashSet::new(),
        }
    }
}

/// A [`TypeSystem`] described by SDL type definitions.
#[derive(Debug)]
pub struct SdlSchema {
    types: HashMap<String, TypeDefinition>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl SdlSchema {
    pub fn parse(sdl: &str) -> Result<Self, SchemaError> {
        let document = parse_schema::<String>(sdl).map_err(|e| SchemaError::Parse(e.to_string()))?;

        Ok(Self::from(&document))
    }

    fn add_fields(&mut self, type_name: &str, fields: &[parser::Field<'_, String>]) {
        if let Some(definition) = self.types.get_mut(type_name) {
            for field in fields {
                let argument_defaults = field
                    .arguments
                    .iter()
                    .filter_map(|argument| {
                        argument.default_value.as_ref().map(|default_value| {
                            (
                                argument.name.clone(),
                                value_from_ast(&InputValue::from(default_value), &Value::Null),
                            )
                        })
                    })
                    .collect();

                definition.fields.insert(
                    field.name.clone(),
                    FieldDefinition {
                        field_type: OutputType::from(&field.field_type),
                        argument_defaults,
                    },
                );
            }
        }
    }

    fn add_possible_types<'a>(&mut self, abstract_types: impl IntoIterator<Item = &'a String>, object_type: &str) {
        for abstract_type in abstract_types {
            self.types
                .entry(abstract_type.clone())
                .or_insert_with(|| TypeDefinition::new(TypeKind::Interface))
                .possible_types
                .insert(object_type.to_string());
        }
    }

    fn field(&self, parent_type: &str, field_name: &str) -> Option<&FieldDefinition> {
        self.types.get(parent_type)?.fields.get(field_name)
    }
}

impl From<&parser::Document<'_, String>> for SdlSchema {
    fn from(document: &parser::Document<'_, String>) -> Self {
        let mut schema = SdlSchema {
            types: BUILTIN_SCALARS
                .iter()
                .map(|name| (name.to_string(), TypeDefinition::new(TypeKind::Scalar)))
                .collect(),
            query_type: None,
            mutation_type: None,
            subscription_type: None,
        };
        let mut schema_definition = None;

        // Register every type first, so member lists can refer to types defined later.
        for definition in &document.definitions {
            if let parser::Definition::TypeDefinition(type_definition) = definition {
                let (name, kind) = match type_definition {
                    parser::TypeDefinition::Scalar(t) => (&t.name, TypeKind::Scalar),
                    parser::TypeDefinition::Object(t) => (&t.name, TypeKind::Object),
                    parser::TypeDefinition::Interface(t) => (&t.name, TypeKind::Interface),
                    parser::TypeDefinition::Union(t) => (&t.name, TypeKind::Union),
                    parser::TypeDefinition::Enum(t) => (&t.name, TypeKind::Enum),
                    parser::TypeDefinition::InputObject(t) => (&t.name, TypeKind::InputObject),
                };
                schema
                    .types
                    .entry(name.clone())
                    .or_insert_with(|| TypeDefinition::new(kind))
                    .kind = kind;
            }
        }

        for definition in &document.definitions {
            match definition {
                parser::Definition::SchemaDefinition(definition) => {
                    schema_definition = Some(definition);
                }
                parser::Definition::TypeDefinition(parser::TypeDefinition::Object(object)) => {
                    schema.add_fields(&object.name, &object.fields);
                    schema.add_possible_types(&object.implements_interfaces, &object.name);
                }
                parser::Definition::TypeDefinition(parser::TypeDefinition::Interface(interface)) => {
                    schema.add_fields(&interface.name, &interface.fields);
                }
                parser::Definition::TypeDefinition(parser::TypeDefinition::Union(union)) => {
                    if let Some(definition) = schema.types.get_mut(&union.name) {
                        definition.possible_types.extend(union.types.iter().cloned());
                    }
                }
                parser::Definition::TypeDefinition(parser::TypeDefinition::Enum(enum_type)) => {
                    if let Some(definition) = schema.types.get_mut(&enum_type.name) {
                        definition
                            .enum_values
                            .extend(enum_type.values.iter().map(|v| v.name.clone()));
                    }
                }
                parser::Definition::TypeExtension(parser::TypeExtension::Object(extension)) => {
                    schema.add_fields(&extension.name, &extension.fields);
                    schema.add_possible_types(&extension.implements_interfaces, &extension.name);
                }
                _ => {}
            }
        }

        let defined = |name: &str| schema.types.contains_key(name).then(|| name.to_string());
        let (query_type, mutation_type, subscription_type) = match schema_definition {
            Some(definition) => (
                definition.query.clone(),
                definition.mutation.clone(),
                definition.subscription.clone(),
            ),
            None => (defined("Query"), defined("Mutation"), defined("Subscription")),
        };
        schema.query_type = query_type;
        schema.mutation_type = mutation_type;
        schema.subscription_type = subscription_type;

        schema
    }
}

impl TypeSystem for SdlSchema {
    fn type_kind(&self, type_name: &str) -> Option<TypeKind> {
        self.types.get(type_name).map(|t| t.kind)
    }

    fn field_type(&self, parent_type: &str, field_name: &str) -> Option<OutputType> {
        self.field(parent_type, field_name)
            .map(|field| field.field_type.clone())
    }

    fn is_possible_type(&self, abstract_type: &str, object_type: &str) -> bool {
        if abstract_type == object_type {
            return true;
        }

        self.types
            .get(abstract_type)
            .is_some_and(|t| t.possible_types.contains(object_type))
    }

    fn root_type(&self, operation: OperationKind) -> Option<&str> {
        match operation {
            OperationKind::Query => self.query_type.as_deref(),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    fn argument_defaults(&self, parent_type: &str, field_name: &str) -> Vec<(String, Value)> {
        self.field(parent_type, field_name)
            .map(|field| field.argument_defaults.clone())
            .unwrap_or_default()
    }

    fn serialize_enum(&self, enum_type: &str, value: &Value) -> Result<Value, String> {
        let known = self
            .types
            .get(enum_type)
            .is_some_and(|t| t.kind == TypeKind::Enum);

        match value.as_str() {
            Some(name) if !known => Ok(Value::String(name.to_string())),
            Some(name) => match self.types.get(enum_type) {
                Some(t) if t.enum_values.contains(name) => Ok(Value::String(name.to_string())),
                _ => Err(format!(
                    "Enum \"{}\" cannot represent value: \"{}\"",
                    enum_type, name
                )),
            },
            None => Err(format!(
                "Enum \"{}\" cannot represent non-string value: {}",
                enum_type, value
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::document::OperationKind,
        response::value::Value,
        schema::{sdl::SdlSchema, OutputType, TypeKind, TypeSystem},
    };

    const SDL: &str = r#"
        schema { query: RootQuery }
        type RootQuery { node(id: ID!, depth: Int = 2): Node, search: [SearchResult!]! }
        interface Node { id: ID! }
        type User implements Node { id: ID!, role: Role }
        type Post implements Node { id: ID! }
        union SearchResult = User | Post
        enum Role { ADMIN, MEMBER }
        extend type User { email: String }
    "#;

    #[test]
    fn describes_the_type_graph() {
        let schema = SdlSchema::parse(SDL).expect("valid schema");

        assert_eq!(schema.root_type(OperationKind::Query), Some("RootQuery"));
        assert_eq!(schema.root_type(OperationKind::Mutation), None);
        assert_eq!(schema.type_kind("Node"), Some(TypeKind::Interface));
        assert_eq!(schema.type_kind("SearchResult"), Some(TypeKind::Union));
        assert_eq!(schema.type_kind("ID"), Some(TypeKind::Scalar));
        assert_eq!(
            schema.field_type("RootQuery", "search"),
            Some(OutputType::non_null(OutputType::list(OutputType::non_null(
                OutputType::named("SearchResult")
            ))))
        );
        assert_eq!(
            schema.field_type("User", "email"),
            Some(OutputType::named("String"))
        );
        assert!(schema.is_possible_type("Node", "User"));
        assert!(schema.is_possible_type("SearchResult", "Post"));
        assert!(!schema.is_possible_type("SearchResult", "Role"));
        assert_eq!(
            schema.argument_defaults("RootQuery", "node"),
            vec![("depth".to_string(), Value::I64(2))]
        );
    }

    #[test]
    fn enum_values_are_checked() {
        let schema = SdlSchema::parse(SDL).expect("valid schema");

        assert_eq!(
            schema.serialize_enum("Role", &Value::from("ADMIN")),
            Ok(Value::from("ADMIN"))
        );
        assert!(schema.serialize_enum("Role", &Value::from("OWNER")).is_err());
        assert!(schema.serialize_enum("Role", &Value::I64(1)).is_err());
    }

    #[test]
    fn default_root_type_names() {
        let schema = SdlSchema::parse("type Query { a: Int } type Mutation { b: Int }")
            .expect("valid schema");

        assert_eq!(schema.root_type(OperationKind::Query), Some("Query"));
        assert_eq!(schema.root_type(OperationKind::Mutation), Some("Mutation"));
        assert_eq!(schema.root_type(OperationKind::Subscription), None);
    }
}
