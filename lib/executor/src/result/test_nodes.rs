//! Hand-built analyses for exercising the tree without running resolvers.

use std::sync::Arc;

use crate::{
    ast::field_map::FieldMap,
    execution::{
        analysis::{FetchedValueAnalysis, FetchedValueType, FieldSubSelection},
        step_info::ExecutionStepInfo,
    },
    response::{
        path::{PathSegment, ResponsePath},
        value::Value,
    },
    result::{builder::build_object_node, node::ResultNode},
    schema::OutputType,
};

/// `"[String!]!"` style type notation.
pub(crate) fn parse_type(notation: &str) -> OutputType {
    if let Some(inner) = notation.strip_suffix('!') {
        return OutputType::non_null(parse_type(inner));
    }
    match notation.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(item) => OutputType::list(parse_type(item)),
        None => OutputType::named(notation),
    }
}

/// `"a.0.b"` style path notation, empty for the root.
pub(crate) fn parse_path(notation: &str) -> ResponsePath {
    notation
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.parse::<usize>() {
            Ok(index) => PathSegment::Index(index),
            Err(_) => PathSegment::Key(segment.to_string()),
        })
        .collect::<Vec<_>>()
        .into()
}

pub(crate) fn info(path: &str, output_type: &str) -> Arc<ExecutionStepInfo> {
    Arc::new(ExecutionStepInfo {
        output_type: parse_type(output_type),
        field_nodes: Vec::new(),
        parent_type: None,
        path: parse_path(path),
        arguments: Value::Null,
        parent: None,
    })
}

fn named(mut analysis: FetchedValueAnalysis, path: &str) -> FetchedValueAnalysis {
    analysis.name = path.rsplit('.').next().unwrap_or_default().to_string();
    analysis
}

pub(crate) fn scalar(path: &str, output_type: &str, value: Value) -> FetchedValueAnalysis {
    let step_info = info(path, output_type);
    let analysis = if value.is_null() {
        FetchedValueAnalysis::null(FetchedValueType::Scalar, step_info, vec![])
    } else {
        FetchedValueAnalysis::completed(FetchedValueType::Scalar, value, step_info, vec![])
    };
    named(analysis, path)
}

pub(crate) fn list(
    path: &str,
    output_type: &str,
    children: Vec<FetchedValueAnalysis>,
) -> FetchedValueAnalysis {
    named(
        FetchedValueAnalysis::list(children, info(path, output_type), vec![]),
        path,
    )
}

pub(crate) fn object(path: &str, output_type: &str) -> FetchedValueAnalysis {
    named(
        FetchedValueAnalysis::object(
            FieldSubSelection {
                source: Value::object([("path", Value::from(path))]),
                fields: Arc::new(FieldMap::new()),
                step_info: info(path, output_type),
            },
            vec![],
        ),
        path,
    )
}

/// Resolved object node at the position of `analysis`.
pub(crate) fn resolved(
    analysis: FetchedValueAnalysis,
    fields: Vec<FetchedValueAnalysis>,
) -> Arc<ResultNode> {
    Arc::new(ResultNode::Object(build_object_node(
        Arc::new(analysis),
        fields,
    )))
}
