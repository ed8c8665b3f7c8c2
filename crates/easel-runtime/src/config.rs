//! Session configuration.

use easel_types::SandboxError;
use serde::{Deserialize, Serialize};

/// Instruction ceiling for one run.
pub const DEFAULT_INSTRUCTION_LIMIT: u64 = 100_000;
/// Guest VM instructions between two budget checks.
pub const DEFAULT_INSTRUCTION_QUANTUM: u32 = 1_000;
/// Interpreter allocation ceiling.
pub const DEFAULT_MEMORY_LIMIT: usize = 32 * 1024 * 1024;
pub const DEFAULT_TITLE: &str = "HackTheMidlands v7";
pub const DEFAULT_CONTENT: &str = "Lorem Ipsum";

/// Limits and initial values for a [`Session`](crate::Session).
///
/// Canvas dimensions are fixed and deliberately not part of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// A run aborts once its charged cost exceeds this.
    pub instruction_limit: u64,
    /// How many guest instructions each budget check charges.
    pub instruction_quantum: u32,
    /// Interpreter memory ceiling in bytes; `None` disables it.
    pub memory_limit: Option<usize>,
    /// Initial value of the guest's `title`.
    pub title: String,
    /// Initial value of the guest's `content`.
    pub content: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            instruction_limit: DEFAULT_INSTRUCTION_LIMIT,
            instruction_quantum: DEFAULT_INSTRUCTION_QUANTUM,
            memory_limit: Some(DEFAULT_MEMORY_LIMIT),
            title: DEFAULT_TITLE.to_string(),
            content: DEFAULT_CONTENT.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn with_instruction_limit(mut self, limit: u64) -> Self {
        self.instruction_limit = limit;
        self
    }

    pub fn with_instruction_quantum(mut self, quantum: u32) -> Self {
        self.instruction_quantum = quantum;
        self
    }

    pub fn with_memory_limit(mut self, limit: Option<usize>) -> Self {
        self.memory_limit = limit;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SandboxError> {
        if self.instruction_quantum == 0 {
            return Err(SandboxError::Config(
                "instruction_quantum must be positive".into(),
            ));
        }
        if self.instruction_limit == 0 {
            return Err(SandboxError::Config(
                "instruction_limit must be positive".into(),
            ));
        }
        if self.memory_limit == Some(0) {
            return Err(SandboxError::Config(
                "memory_limit must be positive (use none to disable)".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sandbox_contract() {
        let config = SessionConfig::default();
        assert_eq!(config.instruction_limit, 100_000);
        assert_eq!(config.instruction_quantum, 1_000);
        assert_eq!(config.title, "HackTheMidlands v7");
        assert_eq!(config.content, "Lorem Ipsum");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_quantum_is_rejected() {
        let err = SessionConfig::default()
            .with_instruction_quantum(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SandboxError::Config(_)));
    }

    #[test]
    fn zero_memory_limit_is_rejected() {
        let config = SessionConfig::default().with_memory_limit(Some(0));
        assert!(config.validate().is_err());
        assert!(config.with_memory_limit(None).validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "instruction_limit": 5000, "title": "Dusk" }"#).unwrap();
        assert_eq!(config.instruction_limit, 5000);
        assert_eq!(config.instruction_quantum, DEFAULT_INSTRUCTION_QUANTUM);
        assert_eq!(config.memory_limit, Some(DEFAULT_MEMORY_LIMIT));
        assert_eq!(config.title, "Dusk");
        assert_eq!(config.content, DEFAULT_CONTENT);
    }
}
