//! Helpers around the process environment

pub mod env;
pub mod runtime;
pub mod testing;

pub use runtime::{args, fix_version, program};
