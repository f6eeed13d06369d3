//! Named sub-commands on top of a flag namespace
//!
//! A command is any type implementing [`Command`], usually holding its own
//! [`ClapFlags`](crate::flags::ClapFlags):
//!
//! ```
//! use cmdset::command::{Command, CommandSet};
//! use cmdset::errors::{CommandError, CommandResult};
//! use cmdset::flags::{ClapFlags, ErrorHandling, FlagSet};
//!
//! struct Greet {
//!     flags: ClapFlags,
//!     who: String,
//! }
//!
//! impl Command for Greet {
//!     fn name(&self) -> &str {
//!         "greet"
//!     }
//!     fn description(&self) -> &str {
//!         "Say hello"
//!     }
//!     fn usage(&self) {
//!         cmdset::usage::print_usage(&self.flags, "Usage: {Program} {Name} <who>");
//!     }
//!     fn parse(&mut self, arguments: &[String]) -> CommandResult<()> {
//!         let rest = self.flags.parse(arguments)?;
//!         let [who] = rest.as_slice() else {
//!             return Err(CommandError::NArg);
//!         };
//!         self.who = who.clone();
//!         Ok(())
//!     }
//!     fn run(&mut self) -> CommandResult<()> {
//!         println!("hello {}", self.who);
//!         Ok(())
//!     }
//! }
//!
//! let mut commands = CommandSet::new();
//! commands.add(Box::new(Greet {
//!     flags: ClapFlags::new("greet", ErrorHandling::ContinueOnError),
//!     who: String::new(),
//! }));
//! assert!(commands.lookup("greet").is_some());
//! ```

pub mod global;
pub mod set;

use crate::errors::CommandResult;

pub use set::{CommandSet, DEFAULT_USAGE};

/// A named unit of work dispatched from the command line.
///
/// `name` is the dispatch key and must be unique within a set. An empty
/// `description` marks the command as unlisted: it is left out of command
/// listings but can still be dispatched.
pub trait Command: Send {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Print help for this command to standard error. Must not exit.
    fn usage(&self);

    /// Bind the arguments following the command name.
    fn parse(&mut self, arguments: &[String]) -> CommandResult<()>;

    /// Execute using the state bound by `parse`.
    fn run(&mut self) -> CommandResult<()>;
}
