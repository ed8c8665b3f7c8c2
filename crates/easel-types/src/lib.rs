//! Shared types for the Easel sandbox.
//!
//! This crate defines the packed color representation, the fixed-size
//! canvas, the snapshot returned by a successful run, the transport-shaped
//! report, and the error taxonomy shared by every Easel crate.

mod canvas;
mod color;
mod error;
mod report;

pub use canvas::{Canvas, HEIGHT, WIDTH};
pub use color::{Color, COLOR_MASK};
pub use error::{ErrorKind, SandboxError};
pub use report::{RunReport, Snapshot};

/// Result type used throughout the Easel sandbox.
pub type Result<T> = std::result::Result<T, SandboxError>;
