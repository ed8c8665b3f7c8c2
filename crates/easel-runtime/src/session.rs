//! Sessions: one isolated interpreter bound to one compiled guest script.
//!
//! Lifecycle:
//! 1. `Session::new` builds the interpreter, installs the sandbox ABI and
//!    compiles the source (syntax errors fail here)
//! 2. `run()` any number of times; guest state carries over between runs,
//!    only the instruction budget is reset
//! 3. drop (or `close`) releases the interpreter

use easel_types::{Result, SandboxError, Snapshot};
use mlua::{Function, Lua, LuaOptions, StdLib, Table};
use tracing::{debug, warn};

use crate::abi;
use crate::budget::BudgetMonitor;
use crate::error::{classify, compile_error, setup_error};
use crate::extract;
use crate::SessionConfig;

/// Chunk name used in guest error messages (`guest:3: ...`).
const CHUNK_NAME: &str = "=guest";

/// A sandboxed guest script, compiled once and runnable many times.
///
/// A session is single-threaded: `run` takes `&mut self` and the session
/// cannot be sent across threads. Independent sessions share nothing and
/// can run in parallel, each on the thread that created it.
pub struct Session {
    lua: Lua,
    /// The guest's entire global environment.
    env: Table,
    /// The compiled chunk, with `env` as its `_ENV`.
    chunk: Function,
    budget: BudgetMonitor,
    config: SessionConfig,
    source: String,
    runs: u64,
}

impl Session {
    /// Compile `source` with the default configuration.
    pub fn new(source: &str) -> Result<Self> {
        Self::with_config(source, SessionConfig::default())
    }

    /// Compile `source` with explicit limits and initial values.
    pub fn with_config(source: &str, config: SessionConfig) -> Result<Self> {
        config.validate()?;

        // No optional libraries at all; the base library the interpreter
        // always opens stays out of reach because the chunk gets its own _ENV.
        let lua = Lua::new_with(StdLib::NONE, LuaOptions::default()).map_err(setup_error)?;
        let env = abi::install(&lua, &config).map_err(setup_error)?;

        let chunk = lua
            .load(source)
            .set_name(CHUNK_NAME)
            .set_environment(env.clone())
            .into_function()
            .map_err(compile_error)?;

        if let Some(limit) = config.memory_limit {
            lua.set_memory_limit(limit).map_err(setup_error)?;
        }

        let budget = BudgetMonitor::new(config.instruction_limit, config.instruction_quantum);
        budget.install(&lua);

        debug!(
            source_len = source.len(),
            instruction_limit = config.instruction_limit,
            "session created"
        );

        Ok(Self {
            lua,
            env,
            chunk,
            budget,
            config,
            source: source.to_string(),
            runs: 0,
        })
    }

    /// Execute the compiled script once and snapshot its output.
    ///
    /// Every failure, including budget exhaustion, comes back as an `Err`;
    /// an error never carries partial output. Title, content and image are
    /// not reset first, so each run continues from the state the previous
    /// one left behind.
    pub fn run(&mut self) -> Result<Snapshot> {
        self.budget.reset();

        let outcome: mlua::Result<()> = self.chunk.call(());
        let result = match outcome {
            Ok(()) => extract::snapshot(&self.lua, &self.env),
            Err(err) => Err(classify(&err, &self.budget)),
        };
        self.runs += 1;

        if let Err(err) = self.lua.gc_collect() {
            warn!(error = %err, "garbage collection after run failed");
        }

        match &result {
            Ok(_) => debug!(run = self.runs, cost = self.budget.cost(), "run completed"),
            Err(SandboxError::BudgetExceeded { limit }) => {
                warn!(run = self.runs, limit, "run aborted: instruction budget exhausted")
            }
            Err(err) => debug!(run = self.runs, error = %err, "run failed"),
        }
        result
    }

    /// Release the interpreter and everything it owns.
    pub fn close(self) {
        debug!(runs = self.runs, "session closed");
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of `run` calls made so far, successful or not.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Instruction cost charged by the most recent run.
    pub fn last_cost(&self) -> u64 {
        self.budget.cost()
    }

    /// Bytes currently held by the interpreter.
    pub fn memory_used(&self) -> usize {
        self.lua.used_memory()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("runs", &self.runs)
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}
