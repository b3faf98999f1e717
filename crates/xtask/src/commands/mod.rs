//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod curve;
mod simulate;

pub use curve::Curve;
pub use simulate::Simulate;
