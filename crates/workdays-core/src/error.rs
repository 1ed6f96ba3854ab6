use thiserror::Error;

/// Reasons a query produces no answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("expected exactly two dates, found {found}")]
    NoDatesFound { found: usize },

    #[error("only {parsed} of two dates could be parsed")]
    IncompleteParse { parsed: usize },
}
