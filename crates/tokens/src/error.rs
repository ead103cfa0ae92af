use thiserror::Error;

/// Error type for token stream reading and replay.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("unexpected end of token stream")]
    UnexpectedEnd,
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },
    #[error("value nesting exceeds {0} levels")]
    DepthExceeded(usize),
}
