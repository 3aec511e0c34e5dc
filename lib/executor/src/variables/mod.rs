use crate::{
    ast::{document::OperationNode, value::InputValue},
    response::value::Value,
};

/// Provided variables, completed with the defaults declared by the operation.
/// Variables neither provided nor defaulted are left out.
pub fn collect_variables(operation: &OperationNode, provided: Option<Value>) -> Value {
    let mut provided = match provided {
        Some(Value::Object(entries)) => entries,
        _ => Vec::new(),
    };

    for definition in &operation.variable_definitions {
        let already_provided = provided.iter().any(|(name, _)| name == &definition.name);
        if already_provided {
            continue;
        }

        if let Some(default_value) = &definition.default_value {
            provided.push((
                definition.name.clone(),
                value_from_ast(default_value, &Value::Null),
            ));
        }
    }

    Value::Object(provided)
}

pub fn value_from_ast(value: &InputValue, variables: &Value) -> Value {
    match value {
        InputValue::Null => Value::Null,
        InputValue::Boolean(b) => Value::Bool(*b),
        InputValue::String(s) => Value::String(s.clone()),
        InputValue::Enum(e) => Value::String(e.clone()),
        InputValue::Int(n) => Value::I64(*n),
        InputValue::Float(n) => Value::F64(*n),
        InputValue::List(l) => Value::Array(l.iter().map(|v| value_from_ast(v, variables)).collect()),
        InputValue::Object(o) => Value::Object(
            o.iter()
                .map(|(k, v)| (k.clone(), value_from_ast(v, variables)))
                .collect(),
        ),
        // If variable not found, it is null
        InputValue::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{document::OperationDocument, value::InputValue},
        response::value::Value,
        variables::{collect_variables, value_from_ast},
    };

    #[test]
    fn substitutes_variables_in_nested_values() {
        let variables = Value::object([("limit", Value::I64(5))]);
        let input = InputValue::Object(vec![
            ("first".to_string(), InputValue::Variable("limit".to_string())),
            ("missing".to_string(), InputValue::Variable("other".to_string())),
            (
                "order".to_string(),
                InputValue::List(vec![InputValue::Enum("ASC".to_string())]),
            ),
        ]);

        assert_eq!(
            value_from_ast(&input, &variables),
            Value::object([
                ("first", Value::I64(5)),
                ("missing", Value::Null),
                ("order", Value::Array(vec![Value::from("ASC")])),
            ])
        );
    }

    #[test]
    fn fills_declared_defaults() {
        let document = OperationDocument::parse(
            "query Q($a: Int = 1, $b: String = \"x\", $c: Boolean) { f }",
        )
        .expect("valid");
        let operation = document.operation(None).expect("single operation");

        let variables = collect_variables(operation, Some(Value::object([("b", Value::from("y"))])));

        assert_eq!(variables.get("a"), Some(&Value::I64(1)));
        assert_eq!(variables.get("b"), Some(&Value::from("y")));
        assert_eq!(variables.get("c"), None);
    }
}
