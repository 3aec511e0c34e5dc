use graphql_parser::query::Value as ParserValue;

/// Literal argument value as written in the document, before variables are substituted.
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue {
    Variable(String),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<InputValue>),
    Object(Vec<(String, InputValue)>),
}

impl From<&ParserValue<'_, String>> for InputValue {
    fn from(value: &ParserValue<'_, String>) -> Self {
        match value {
            ParserValue::Variable(name) => InputValue::Variable(name.to_owned()),
            ParserValue::Int(i) => InputValue::Int(i.as_i64().unwrap_or_default()),
            ParserValue::Float(f) => InputValue::Float(*f),
            ParserValue::String(s) => InputValue::String(s.to_owned()),
            ParserValue::Boolean(b) => InputValue::Boolean(*b),
            ParserValue::Null => InputValue::Null,
            ParserValue::Enum(e) => InputValue::Enum(e.to_owned()),
            ParserValue::List(l) => InputValue::List(l.iter().map(InputValue::from).collect()),
            ParserValue::Object(o) => InputValue::Object(
                o.iter()
                    .map(|(k, v)| (k.to_string(), InputValue::from(v)))
                    .collect(),
            ),
        }
    }
}
