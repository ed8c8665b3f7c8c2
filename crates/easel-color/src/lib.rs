//! Easel color builtins.
//!
//! The two pure functions guest scripts call to build packed colors:
//!
//! - `rgb(r, g, b)`: integer channels, or fractions of full scale
//! - `hsl(h, s, l)`: degrees / percent, or fractions of circle / unit
//!
//! Arguments are tagged as [`ColorArg::Integer`] or [`ColorArg::Real`]
//! according to how the guest supplied them, and each tag has its own
//! conversion rule. Both functions take exactly [`ARITY`] arguments.

mod arg;
mod convert;
mod error;

pub use arg::ColorArg;
pub use convert::{check_arity, hsl, hsl_to_color, rgb, ARITY};
pub use error::ColorError;
