//! Instruction budget metering.
//!
//! The monitor installs a count hook that fires every `quantum` guest VM
//! instructions. Each firing charges `quantum` to the cost counter; once
//! the counter exceeds the limit the hook raises a runtime error, which
//! unwinds the whole guest call stack for the current run.
//!
//! The bound is on executed instructions, not wall-clock time, so it is
//! the same on every host.

use mlua::{HookTriggers, Lua, VmState};
use std::cell::Cell;
use std::rc::Rc;
use tracing::trace;

/// Error message raised inside the guest when the budget runs out.
pub const BUDGET_MESSAGE: &str = "too many instructions";

#[derive(Debug)]
struct Meter {
    limit: u64,
    quantum: u32,
    cost: Cell<u64>,
    exhausted: Cell<bool>,
}

/// Per-session instruction counter.
///
/// The session owns one monitor and the interpreter hook holds a clone of
/// the same handle, so the hook reaches its session's counter directly.
#[derive(Debug, Clone)]
pub struct BudgetMonitor {
    meter: Rc<Meter>,
}

impl BudgetMonitor {
    pub fn new(limit: u64, quantum: u32) -> Self {
        Self {
            meter: Rc::new(Meter {
                limit,
                quantum,
                cost: Cell::new(0),
                exhausted: Cell::new(false),
            }),
        }
    }

    /// Register the count hook on `lua`.
    pub fn install(&self, lua: &Lua) {
        let monitor = self.clone();
        let triggers = HookTriggers::new().every_nth_instruction(self.meter.quantum);
        lua.set_hook(triggers, move |_lua, _debug| monitor.charge());
    }

    /// Zero the counter at the start of a run.
    pub fn reset(&self) {
        self.meter.cost.set(0);
        self.meter.exhausted.set(false);
    }

    /// Charge one quantum. Fails once the total exceeds the limit.
    pub fn charge(&self) -> mlua::Result<VmState> {
        let cost = self
            .meter
            .cost
            .get()
            .saturating_add(u64::from(self.meter.quantum));
        self.meter.cost.set(cost);
        trace!(cost, limit = self.meter.limit, "budget hook");
        if cost > self.meter.limit {
            self.meter.exhausted.set(true);
            return Err(mlua::Error::runtime(BUDGET_MESSAGE));
        }
        Ok(VmState::Continue)
    }

    /// Instructions charged since the last reset.
    pub fn cost(&self) -> u64 {
        self.meter.cost.get()
    }

    pub fn limit(&self) -> u64 {
        self.meter.limit
    }

    pub fn quantum(&self) -> u32 {
        self.meter.quantum
    }

    /// Whether the current run was aborted by this monitor.
    pub fn is_exhausted(&self) -> bool {
        self.meter.exhausted.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_quanta_fit_the_default_budget() {
        let monitor = BudgetMonitor::new(100_000, 1_000);
        for _ in 0..100 {
            assert!(monitor.charge().is_ok());
        }
        assert_eq!(monitor.cost(), 100_000);
        assert!(!monitor.is_exhausted());

        let Err(err) = monitor.charge() else {
            panic!("budget should be exhausted");
        };
        assert!(err.to_string().contains(BUDGET_MESSAGE));
        assert!(monitor.is_exhausted());
        assert_eq!(monitor.cost(), 101_000);
    }

    #[test]
    fn reset_clears_cost_and_exhaustion() {
        let monitor = BudgetMonitor::new(10, 10);
        assert!(monitor.charge().is_ok());
        assert!(monitor.charge().is_err());
        monitor.reset();
        assert_eq!(monitor.cost(), 0);
        assert!(!monitor.is_exhausted());
        assert!(monitor.charge().is_ok());
    }

    #[test]
    fn clones_share_one_counter() {
        let monitor = BudgetMonitor::new(100, 5);
        let hook_side = monitor.clone();
        hook_side.charge().unwrap();
        hook_side.charge().unwrap();
        assert_eq!(monitor.cost(), 10);
    }

    #[test]
    fn hook_aborts_endless_loop() {
        let lua = Lua::new();
        let monitor = BudgetMonitor::new(5_000, 100);
        monitor.install(&lua);
        let err = lua.load("while true do end").exec().unwrap_err();
        assert!(err.to_string().contains(BUDGET_MESSAGE));
        assert!(monitor.is_exhausted());
        assert!(monitor.cost() > monitor.limit());
    }
}
