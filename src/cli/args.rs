//! Global flags and usage text of the `cmdset` binary

use clap::{Arg, ArgAction};

use crate::flags::{ClapFlags, ErrorHandling};

/// Top-level usage of the binary.
pub const USAGE: &str = "
{Program} dispatches a named command with its own flags.

Usage:

  {Program} [flags] <command> [arguments...]

Flags:

  {PrintDefaults}

Commands:

  {PrintCommands}

Settings are read from $XDG_CONFIG_HOME/cmdset/cmdset.toml, the file named by
$CMDSET_CONFIG, and CMDSET_* environment variables, in that order.
";

/// Flags accepted before the command name. Parse errors are handed back to the caller.
pub fn global_flags() -> ClapFlags {
    ClapFlags::new("cmdset", ErrorHandling::ContinueOnError)
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-d info, -dd debug, -ddd trace)"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable colored output"),
        )
}
