use miette::Diagnostic;
use std::fmt::Display;
use thiserror::Error;

/// The three error kinds the engine can surface, lined up with the
/// validation / cancellation / invariant-violation split the contract
/// draws between them.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum SetChallengeError {
    #[diagnostic(code(set_challenge::invalid_argument))]
    InvalidArgument(String),

    #[diagnostic(code(set_challenge::cancelled))]
    Cancelled,

    #[diagnostic(code(set_challenge::internal))]
    Internal(String),
}

impl Display for SetChallengeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetChallengeError::InvalidArgument(e) => write!(f, "invalid argument: {}", e),
            SetChallengeError::Cancelled => write!(f, "run cancelled"),
            SetChallengeError::Internal(e) => write!(f, "internal invariant violation: {}", e),
        }
    }
}
