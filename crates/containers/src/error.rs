use thiserror::Error;

/// Error type for container construction from parts.
///
/// Raised when decoded parts would violate a construction invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("a failed outcome requires at least one fault reason")]
    FailedWithoutFaults,
    #[error("a successful outcome requires a value")]
    SuccessWithoutValue,
    #[error("a failed outcome cannot carry a value")]
    ValueOnFailed,
    #[error("union index {index} out of range for arity {arity}")]
    IndexOutOfRange { index: usize, arity: usize },
}
