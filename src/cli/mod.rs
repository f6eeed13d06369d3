//! CLI layer of the `cmdset` binary: global flags, commands, terminal output

pub mod args;
pub mod commands;
pub mod output;

pub use args::{global_flags, USAGE};
pub use commands::register;
