//! Input handling module
//!
//! Provides the placement signals and the bindings that produce them.

mod binding;
mod signal;

pub use binding::{SignalMapper, Trigger};
pub use signal::Signal;
