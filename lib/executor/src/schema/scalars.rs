use crate::response::value::Value;

/// Result coercion of the built-in scalars.
/// Returns `None` for any other scalar.
pub fn serialize_builtin_scalar(scalar_type: &str, value: &Value) -> Option<Result<Value, String>> {
    let serialized = match scalar_type {
        "Int" => serialize_int(value),
        "Float" => serialize_float(value),
        "String" => serialize_string(value),
        "Boolean" => serialize_boolean(value),
        "ID" => serialize_id(value),
        _ => return None,
    };

    Some(serialized)
}

fn serialize_int(value: &Value) -> Result<Value, String> {
    let as_i32 = |n: i64| {
        i32::try_from(n)
            .map(|n| Value::I64(n as i64))
            .map_err(|_| format!("Int cannot represent non 32-bit signed integer value: {}", n))
    };

    match value {
        Value::I64(n) => as_i32(*n),
        Value::U64(n) => i64::try_from(*n)
            .map_err(|_| format!("Int cannot represent non 32-bit signed integer value: {}", n))
            .and_then(as_i32),
        Value::F64(f) if f.is_finite() && f.fract() == 0.0 => as_i32(*f as i64),
        Value::Bool(b) => Ok(Value::I64(*b as i64)),
        Value::String(s) => match s.parse::<i64>() {
            Ok(n) => as_i32(n),
            Err(_) => Err(format!("Int cannot represent non-integer value: \"{}\"", s)),
        },
        other => Err(format!("Int cannot represent non-integer value: {}", other)),
    }
}

fn serialize_float(value: &Value) -> Result<Value, String> {
    match value {
        // NaN is passed through and completed as null by the analyzer.
        Value::F64(f) if !f.is_infinite() => Ok(Value::F64(*f)),
        Value::I64(n) => Ok(Value::F64(*n as f64)),
        Value::U64(n) => Ok(Value::F64(*n as f64)),
        Value::Bool(b) => Ok(Value::F64(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => match s.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::F64(f)),
            _ => Err(format!("Float cannot represent non numeric value: \"{}\"", s)),
        },
        other => Err(format!("Float cannot represent non numeric value: {}", other)),
    }
}

fn serialize_string(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        Value::I64(n) => Ok(Value::String(n.to_string())),
        Value::U64(n) => Ok(Value::String(n.to_string())),
        Value::F64(f) if f.is_finite() => Ok(Value::String(f.to_string())),
        other => Err(format!("String cannot represent value: {}", other)),
    }
}

fn serialize_boolean(value: &Value) -> Result<Value, String> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::I64(n) => Ok(Value::Bool(*n != 0)),
        Value::U64(n) => Ok(Value::Bool(*n != 0)),
        Value::F64(f) if f.is_finite() => Ok(Value::Bool(*f != 0.0)),
        other => Err(format!("Boolean cannot represent a non boolean value: {}", other)),
    }
}

fn serialize_id(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::I64(n) => Ok(Value::String(n.to_string())),
        Value::U64(n) => Ok(Value::String(n.to_string())),
        Value::F64(f) if f.is_finite() && f.fract() == 0.0 => {
            Ok(Value::String((*f as i64).to_string()))
        }
        other => Err(format!("ID cannot represent value: {}", other)),
    }
}
