//! Named sub-command dispatch on top of a flag-parsing layer.
//!
//! A [`CommandSet`](command::CommandSet) holds commands in registration order.
//! Dispatch parses the top-level flags, takes the first positional argument as
//! the command name, and hands the rest to that command's `parse` and `run`:
//!
//! ```text
//! <program> [global flags] <command> [command flags] [command args...]
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod flags;
pub mod generate;
pub mod usage;
pub mod util;

pub use command::{Command, CommandSet};
pub use errors::{CommandError, CommandResult, DispatchError, FlagError};
pub use flags::{ClapFlags, ErrorHandling, FlagSet};
