pub const TYPENAME_FIELD_NAME: &str = "__typename";
