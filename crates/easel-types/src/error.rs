//! Error taxonomy for sandbox sessions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse error category, for callers that branch on the kind of failure
/// rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Compile,
    Arity,
    BudgetExceeded,
    Runtime,
    OutOfMemory,
    MalformedResult,
    Config,
    Setup,
}

/// Everything that can go wrong while building or running a session.
///
/// Messages are carried verbatim from the interpreter; no attempt is made
/// to sanitize them for display.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SandboxError {
    /// Guest source failed to parse. Raised by session construction.
    #[error("compile error: {0}")]
    Compile(String),

    /// `rgb` / `hsl` called with an argument count other than 3.
    #[error("{0}")]
    Arity(String),

    /// The instruction ceiling was crossed during a run.
    #[error("too many instructions (limit {limit})")]
    BudgetExceeded { limit: u64 },

    /// Any other failure raised while the guest was executing.
    #[error("{0}")]
    Runtime(String),

    /// The interpreter hit its memory ceiling.
    #[error("out of memory: {0}")]
    OutOfMemory(String),

    /// The guest left `title`, `content` or `image` in a shape that cannot
    /// be turned into a snapshot.
    #[error("invalid result: {0}")]
    MalformedResult(String),

    /// The session configuration is unusable.
    #[error("invalid config: {0}")]
    Config(String),

    /// The host failed to build the interpreter or its environment.
    #[error("sandbox setup failed: {0}")]
    Setup(String),
}

impl SandboxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Compile(_) => ErrorKind::Compile,
            Self::Arity(_) => ErrorKind::Arity,
            Self::BudgetExceeded { .. } => ErrorKind::BudgetExceeded,
            Self::Runtime(_) => ErrorKind::Runtime,
            Self::OutOfMemory(_) => ErrorKind::OutOfMemory,
            Self::MalformedResult(_) => ErrorKind::MalformedResult,
            Self::Config(_) => ErrorKind::Config,
            Self::Setup(_) => ErrorKind::Setup,
        }
    }
}
