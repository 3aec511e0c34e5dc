use crate::response::{
    graphql_error::{FieldError, GraphQLError, GraphQLErrorKind, GraphQLErrorLocation},
    path::ResponsePath,
};

/**
 * Turns an error reported relative to a field into a client-facing error.
 *
 * For example if the field lives at `["a", 0, "b"]` and the resolver reports
 * the relative path `["c"]`, the error surfaces at `["a", 0, "b", "c"]`.
 * A missing relative path means the error is about the field itself.
 *
 * Relative locations are offsets from the field location. An empty (but present)
 * list of locations anchors the error at the field location.
 *
 * A kind set on the error is kept, `kind` applies otherwise.
 * Message and extensions are carried over unchanged.
 */
pub fn to_absolute_error(
    error: FieldError,
    base_path: &ResponsePath,
    base_location: Option<GraphQLErrorLocation>,
    kind: GraphQLErrorKind,
) -> GraphQLError {
    let path = match &error.path {
        Some(relative) => base_path.concat(relative),
        None => base_path.clone(),
    };

    let locations = error.locations.map(|relative| {
        if relative.is_empty() {
            return base_location.into_iter().collect();
        }

        match base_location {
            Some(base) => relative
                .iter()
                .map(|offset| GraphQLErrorLocation {
                    line: base.line + offset.line,
                    column: base.column + offset.column,
                })
                .collect(),
            None => relative,
        }
    });

    GraphQLError {
        message: error.message,
        locations,
        path: Some(path),
        extensions: error.extensions,
        kind: error.kind.unwrap_or(kind),
    }
}

/// Error raised by the engine itself about the value at `path`.
pub fn error_at(
    message: String,
    path: &ResponsePath,
    location: Option<GraphQLErrorLocation>,
    kind: GraphQLErrorKind,
) -> GraphQLError {
    GraphQLError {
        message,
        locations: location.map(|l| vec![l]),
        path: Some(path.clone()),
        extensions: None,
        kind,
    }
}
