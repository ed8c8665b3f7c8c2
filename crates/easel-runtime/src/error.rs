//! Mapping interpreter failures onto [`SandboxError`].

use crate::budget::BudgetMonitor;
use easel_color::ColorError;
use easel_types::SandboxError;

const TRACEBACK_MARKER: &str = "\nstack traceback:";

/// Classify the error a guest invocation ended with.
///
/// Budget exhaustion is decided by the monitor, not by the message, so a
/// guest cannot fake it and a wrapped hook error is still recognised.
pub(crate) fn classify(err: &mlua::Error, budget: &BudgetMonitor) -> SandboxError {
    if budget.is_exhausted() {
        return SandboxError::BudgetExceeded {
            limit: budget.limit(),
        };
    }
    match root_cause(err) {
        mlua::Error::ExternalError(inner) => match inner.downcast_ref::<ColorError>() {
            Some(arity @ ColorError::Arity { .. }) => SandboxError::Arity(arity.to_string()),
            Some(other) => SandboxError::Runtime(other.to_string()),
            None => SandboxError::Runtime(inner.to_string()),
        },
        mlua::Error::MemoryError(msg) => SandboxError::OutOfMemory(strip_traceback(msg)),
        mlua::Error::RuntimeError(msg) => SandboxError::Runtime(strip_traceback(msg)),
        other => SandboxError::Runtime(strip_traceback(&other.to_string())),
    }
}

/// Classify a failure to compile the guest source.
pub(crate) fn compile_error(err: mlua::Error) -> SandboxError {
    match err {
        mlua::Error::SyntaxError { message, .. } => SandboxError::Compile(message),
        mlua::Error::MemoryError(msg) => SandboxError::OutOfMemory(msg),
        other => SandboxError::Compile(other.to_string()),
    }
}

pub(crate) fn setup_error(err: mlua::Error) -> SandboxError {
    SandboxError::Setup(err.to_string())
}

/// Errors raised from Rust callbacks arrive wrapped, once per Lua/Rust
/// boundary crossed.
fn root_cause(err: &mlua::Error) -> &mlua::Error {
    match err {
        mlua::Error::CallbackError { cause, .. } => root_cause(cause),
        other => other,
    }
}

fn strip_traceback(msg: &str) -> String {
    match msg.find(TRACEBACK_MARKER) {
        Some(end) => msg[..end].to_string(),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn fresh() -> BudgetMonitor {
        BudgetMonitor::new(100, 10)
    }

    #[test]
    fn exhausted_monitor_wins() {
        let budget = BudgetMonitor::new(10, 10);
        let _ = budget.charge();
        let _ = budget.charge();
        let err = classify(&mlua::Error::runtime("anything"), &budget);
        assert_eq!(err, SandboxError::BudgetExceeded { limit: 10 });
    }

    #[test]
    fn wrapped_arity_errors_are_unwrapped() {
        let cause = mlua::Error::external(ColorError::Arity {
            function: "rgb",
            given: 2,
        });
        let err = mlua::Error::CallbackError {
            traceback: "stack traceback:".into(),
            cause: Arc::new(cause),
        };
        assert_eq!(
            classify(&err, &fresh()),
            SandboxError::Arity("rgb expected 3 arguments".into())
        );
    }

    #[test]
    fn tracebacks_are_dropped() {
        let err = mlua::Error::RuntimeError(
            "guest:1: attempt to index a nil value\nstack traceback:\n\t[C]: in ?".into(),
        );
        assert_eq!(
            classify(&err, &fresh()),
            SandboxError::Runtime("guest:1: attempt to index a nil value".into())
        );
    }

    #[test]
    fn syntax_errors_become_compile_errors() {
        let err = mlua::Error::SyntaxError {
            message: "guest:1: unexpected symbol".into(),
            incomplete_input: false,
        };
        assert_eq!(
            compile_error(err),
            SandboxError::Compile("guest:1: unexpected symbol".into())
        );
    }
}
