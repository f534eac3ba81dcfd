#![forbid(unsafe_code)]

//! Checker contract, registry and the builtin checker set

pub mod builtin;
mod checker;
pub mod doors;
mod limit;
mod registry;
pub mod rooms;
pub mod stairs;
pub mod walls;
pub mod windows;

// Re-export core types
pub use checker::{Checker, Tally, empty_model_summary};
pub use limit::LimitChecker;
pub use registry::CheckerRegistry;
