//! Flag namespace backed by `clap`

use std::any::Any;
use std::io::{self, Write};

use clap::error::ErrorKind;
use clap::{Arg, ArgMatches, Command};
use tracing::trace;

use crate::errors::FlagError;
use crate::flags::{ErrorHandling, FlagSet};

/// Id of the catch-all positional holding everything after the flags.
const ARGUMENTS: &str = "arguments";

/// A flag namespace declared with `clap::Arg`s.
///
/// Only flags should be declared; positional arguments are collected
/// internally and handed back from [`FlagSet::parse`].
///
/// ```
/// use clap::Arg;
/// use cmdset::flags::{ClapFlags, ErrorHandling, FlagSet};
///
/// let mut flags = ClapFlags::new("write", ErrorHandling::ContinueOnError)
///     .arg(Arg::new("output").short('o').default_value("-"));
/// let rest = flags
///     .parse(&["-o".to_string(), "out.txt".to_string(), "hello".to_string()])
///     .unwrap();
/// assert_eq!(rest, vec!["hello".to_string()]);
/// assert_eq!(flags.get_string("output"), Some("out.txt"));
/// ```
#[derive(Debug, Clone)]
pub struct ClapFlags {
    command: Command,
    error_handling: ErrorHandling,
    matches: Option<ArgMatches>,
}

impl ClapFlags {
    pub fn new(name: impl Into<String>, error_handling: ErrorHandling) -> Self {
        let command = Command::new(name.into())
            .no_binary_name(true)
            .disable_version_flag(true)
            .arg(
                Arg::new(ARGUMENTS)
                    .num_args(0..)
                    .trailing_var_arg(true),
            );
        Self {
            command,
            error_handling,
            matches: None,
        }
    }

    /// Declare a flag.
    pub fn arg(self, arg: Arg) -> Self {
        Self {
            command: self.command.arg(arg),
            ..self
        }
    }

    /// Value bound to `id` by the last successful parse.
    pub fn get_one<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Option<&T> {
        self.matches.as_ref()?.try_get_one::<T>(id).ok().flatten()
    }

    pub fn get_string(&self, id: &str) -> Option<&str> {
        self.get_one::<String>(id).map(String::as_str)
    }

    /// State of an `ArgAction::SetTrue` flag; false before parsing.
    pub fn get_flag(&self, id: &str) -> bool {
        self.get_one::<bool>(id).copied().unwrap_or(false)
    }

    /// Occurrences of an `ArgAction::Count` flag.
    pub fn get_count(&self, id: &str) -> u8 {
        self.get_one::<u8>(id).copied().unwrap_or(0)
    }
}

impl FlagSet for ClapFlags {
    fn name(&self) -> &str {
        self.command.get_name()
    }

    fn error_handling(&self) -> ErrorHandling {
        self.error_handling
    }

    fn parse(&mut self, arguments: &[String]) -> Result<Vec<String>, FlagError> {
        self.matches = None;
        let matches = self
            .command
            .try_get_matches_from_mut(arguments)
            .map_err(to_flag_error)?;
        let rest: Vec<String> = matches
            .get_many::<String>(ARGUMENTS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        trace!(name = self.name(), ?rest, "flags parsed");
        self.matches = Some(matches);
        Ok(rest)
    }

    fn print_defaults(&self, out: &mut dyn Write) -> io::Result<()> {
        for arg in self.command.get_arguments() {
            if arg.is_positional() || arg.is_hide_set() || arg.get_id().as_str() == "help" {
                continue;
            }
            let mut line = match (arg.get_short(), arg.get_long()) {
                (Some(short), Some(long)) => format!("  -{short}, --{long}"),
                (Some(short), None) => format!("  -{short}"),
                (None, Some(long)) => format!("  --{long}"),
                (None, None) => continue,
            };
            let takes_values = arg.get_action().takes_values();
            if takes_values {
                let value = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(ToString::to_string)
                    .unwrap_or_else(|| arg.get_id().to_string());
                line.push_str(&format!(" <{value}>"));
            }
            writeln!(out, "{line}")?;

            let mut help = arg.get_help().map(ToString::to_string).unwrap_or_default();
            let defaults: Vec<String> = arg
                .get_default_values()
                .iter()
                .map(|v| v.to_string_lossy().into_owned())
                .collect();
            if takes_values && !defaults.is_empty() {
                if !help.is_empty() {
                    help.push(' ');
                }
                help.push_str(&format!("(default: {})", defaults.join(",")));
            }
            if !help.is_empty() {
                writeln!(out, "        {help}")?;
            }
        }
        Ok(())
    }
}

fn to_flag_error(err: clap::Error) -> FlagError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            FlagError::Help
        }
        _ => {
            let rendered = err.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            FlagError::Invalid(first.trim_start_matches("error: ").trim().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ArgAction;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn write_flags() -> ClapFlags {
        ClapFlags::new("write", ErrorHandling::ContinueOnError)
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FILE")
                    .default_value("-")
                    .help("Write output to FILE"),
            )
            .arg(
                Arg::new("header")
                    .long("header")
                    .action(ArgAction::SetTrue)
                    .help("Prepend a generated-file header"),
            )
    }

    #[test]
    fn given_flags_before_positional_when_parse_then_flags_bound_and_rest_returned() {
        let mut flags = write_flags();
        let rest = flags.parse(&args(&["-o", "out.txt", "--header", "a", "b"])).unwrap();
        assert_eq!(rest, args(&["a", "b"]));
        assert_eq!(flags.get_string("output"), Some("out.txt"));
        assert!(flags.get_flag("header"));
    }

    #[test]
    fn given_flag_after_first_positional_when_parse_then_kept_as_argument() {
        let mut flags = write_flags();
        let rest = flags.parse(&args(&["build", "-o", "out"])).unwrap();
        assert_eq!(rest, args(&["build", "-o", "out"]));
        assert_eq!(flags.get_string("output"), Some("-"));
    }

    #[test]
    fn given_no_arguments_when_parse_then_defaults_and_empty_rest() {
        let mut flags = write_flags();
        let rest = flags.parse(&[]).unwrap();
        assert!(rest.is_empty());
        assert_eq!(flags.get_string("output"), Some("-"));
        assert!(!flags.get_flag("header"));
    }

    #[test]
    fn given_double_dash_when_parse_then_flag_parsing_stops() {
        let mut flags = write_flags();
        let rest = flags.parse(&args(&["--", "-o", "x"])).unwrap();
        assert_eq!(rest, args(&["-o", "x"]));
    }

    #[test]
    fn given_help_flag_when_parse_then_help_error() {
        let mut flags = write_flags();
        let err = flags.parse(&args(&["-h"])).unwrap_err();
        assert!(err.is_help());
    }

    #[test]
    fn given_unknown_flag_when_parse_then_invalid_error() {
        let mut flags = write_flags();
        let err = flags.parse(&args(&["--bogus"])).unwrap_err();
        match err {
            FlagError::Invalid(msg) => assert!(msg.contains("--bogus"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_declared_flags_when_print_defaults_then_lists_in_order() {
        let flags = write_flags();
        let mut out = Vec::new();
        flags.print_defaults(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "  -o, --output <FILE>\n        Write output to FILE (default: -)\n  --header\n        Prepend a generated-file header\n"
        );
    }

    #[test]
    fn given_no_flags_when_print_defaults_then_empty() {
        let flags = ClapFlags::new("empty", ErrorHandling::ExitOnError);
        let mut out = Vec::new();
        flags.print_defaults(&mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(flags.name(), "empty");
        assert_eq!(flags.error_handling(), ErrorHandling::ExitOnError);
    }
}
