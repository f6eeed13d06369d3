//! Process-wide default command set
//!
//! Convenience wrappers for programs that register commands from several
//! places and dispatch once from `main`. Programs that can own a
//! [`CommandSet`] directly should prefer doing so.
//!
//! The set is guarded by a mutex that is held for the whole of [`parse`];
//! a command must not call back into this module from `parse` or `run`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::command::{Command, CommandSet};
use crate::errors::FlagError;
use crate::flags::FlagSet;

static COMMAND_LINE: Mutex<CommandSet> = Mutex::new(CommandSet::new());

fn command_line() -> MutexGuard<'static, CommandSet> {
    COMMAND_LINE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run `f` with exclusive access to the default set.
pub fn with_command_line<R>(f: impl FnOnce(&mut CommandSet) -> R) -> R {
    f(&mut command_line())
}

/// Append `cmd` to the default set unless its name is taken.
pub fn add(cmd: Box<dyn Command>) {
    command_line().add(cmd);
}

/// Whether the default set holds a command named `name`.
pub fn contains(name: &str) -> bool {
    command_line().lookup(name).is_some()
}

/// Description of the command named `name` in the default set.
pub fn lookup_description(name: &str) -> Option<String> {
    command_line()
        .lookup(name)
        .map(|cmd| cmd.description().to_string())
}

/// Visit the default set in insertion order.
pub fn visit(f: impl FnMut(&dyn Command)) {
    command_line().visit(f);
}

/// Replace the top-level usage template of the default set.
pub fn set_usage(template: &'static str) {
    command_line().set_usage(template);
}

/// Parse the process arguments against `flags` and dispatch on the default set.
pub fn parse(flags: &mut dyn FlagSet) -> Result<(), FlagError> {
    let arguments: Vec<String> = std::env::args().skip(1).collect();
    command_line().parse(flags, &arguments)
}

/// Print usage for `flags` listing the default set's commands.
pub fn print_usage(flags: &dyn FlagSet, template: &str) {
    command_line().print_usage(flags, template);
}
