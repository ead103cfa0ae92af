use thiserror::Error;

use sumwire_containers::BuildError;
use sumwire_tokens::{JsonTextError, TokenError};

/// Malformed or incomplete payload. Always fatal to the single call; never
/// retried or suppressed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("object is missing the `{property}` discriminant")]
    MissingDiscriminant { property: &'static str },
    #[error("object is missing the `{property}` property")]
    MissingProperty { property: &'static str },
    #[error("successful result requires a value")]
    MissingValue,
    #[error("failed result requires at least one error reason")]
    FailedWithoutErrors,
    #[error("union index {index} out of range (valid range 0..={max})")]
    IndexOutOfRange { index: i64, max: usize },
    #[error("integer {0} out of range for `{1}`")]
    IntOutOfRange(i64, &'static str),
    #[error("value nesting exceeds {0} levels")]
    DepthExceeded(usize),
}

/// Top-level codec error.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("no converter can handle type `{type_name}`")]
    UnsupportedType { type_name: &'static str },
    #[error("decoded parts violate a container invariant: {0}")]
    Build(#[from] BuildError),
    #[error("value is not a `{expected}`")]
    TypeMismatch { expected: &'static str },
    #[error("JSON text error: {0}")]
    JsonText(#[from] JsonTextError),
}

impl From<TokenError> for CodecError {
    fn from(error: TokenError) -> Self {
        CodecError::Format(FormatError::Token(error))
    }
}
