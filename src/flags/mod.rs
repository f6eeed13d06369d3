//! Flag namespaces: the parsing layer commands are dispatched on top of

pub mod clap_flags;

use std::io::Write;

use crate::errors::FlagError;

pub use clap_flags::ClapFlags;

/// What to do when a flag namespace fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorHandling {
    /// Report the error and hand it back to the caller.
    ContinueOnError,
    /// Report the error and exit (status 2, or 0 for a help request).
    #[default]
    ExitOnError,
    /// Report the error and panic.
    PanicOnError,
}

/// A named group of command-line flags.
pub trait FlagSet {
    /// Name of the flag namespace.
    fn name(&self) -> &str;

    /// Policy applied by callers when `parse` fails.
    fn error_handling(&self) -> ErrorHandling {
        ErrorHandling::ExitOnError
    }

    /// Parse flags from `arguments` and return the remaining positional arguments.
    ///
    /// Flags are consumed up to the first non-flag argument; that argument and
    /// everything after it are returned untouched. Implementations never print
    /// or exit.
    fn parse(&mut self, arguments: &[String]) -> Result<Vec<String>, FlagError>;

    /// Write the names, defaults and help of all declared flags to `out`.
    fn print_defaults(&self, out: &mut dyn Write) -> std::io::Result<()>;
}
