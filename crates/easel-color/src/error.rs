use thiserror::Error;

/// Errors raised by the color builtins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Called with an argument count other than 3.
    #[error("{function} expected 3 arguments")]
    Arity { function: &'static str, given: usize },

    /// An argument was neither an integer nor a real number.
    #[error("bad argument #{position} to '{function}' (number expected, got {found})")]
    NotANumber {
        function: &'static str,
        position: usize,
        found: String,
    },
}
