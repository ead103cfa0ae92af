//! Wire property names.

/// Boolean discriminant of an outcome object.
pub const IS_SUCCESS: &str = "isSuccess";
/// Boolean discriminant of a maybe object.
pub const HAS_VALUE: &str = "hasValue";
/// Integer discriminant of a union object.
pub const INDEX: &str = "index";
/// Element payload slot shared by all three container shapes.
pub const VALUE: &str = "value";
/// Fault reason list of an outcome object.
pub const ERRORS: &str = "errors";
/// Success reason list of an outcome object.
pub const SUCCESSES: &str = "successes";
/// Declared kind name of a reason object (informational only).
pub const TYPE: &str = "type";
/// Message of a reason object.
pub const MESSAGE: &str = "message";
/// Open tag map of a reason object.
pub const TAGS: &str = "tags";
