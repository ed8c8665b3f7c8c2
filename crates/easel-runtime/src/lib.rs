//! Easel sandbox runtime.
//!
//! Runs short, untrusted Lua scripts under a fixed instruction budget and
//! turns what they leave behind into a [`Snapshot`]: a title, a text body
//! and a 64x36 canvas of packed colors.
//!
//! ```text
//! source ─► Session::new ─► (ABI installed, chunk compiled)
//!                 │
//!                 └─► run() ─► budget reset ─► guest chunk ─► extract ─► Snapshot
//!                                                   │
//!                                                   └─► SandboxError
//! ```
//!
//! # Example
//!
//! ```no_run
//! use easel_runtime::Session;
//!
//! let mut session = Session::new(r#"
//!     title = "Sunset"
//!     for x = 0, width - 1 do
//!         for y = 0, height - 1 do
//!             image[x][y] = hsl(x / width, 1.0, y / height)
//!         end
//!     end
//! "#)?;
//! let snapshot = session.run()?;
//! assert_eq!(snapshot.title, "Sunset");
//! # Ok::<(), easel_runtime::SandboxError>(())
//! ```

mod abi;
pub mod budget;
pub mod config;
mod error;
mod extract;
mod session;

pub use abi::GLOBALS;
pub use budget::{BudgetMonitor, BUDGET_MESSAGE};
pub use config::SessionConfig;
pub use easel_types::{
    Canvas, Color, ErrorKind, Result, RunReport, SandboxError, Snapshot, HEIGHT, WIDTH,
};
pub use session::Session;
