pub mod error_normalization;
pub mod graphql_error;
pub mod path;
pub mod response;
pub mod value;
