//! Ordered command registry and dispatch

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::process;

use tracing::{debug, instrument, warn};

use crate::command::Command;
use crate::errors::{DispatchError, FlagError, UsageResult};
use crate::flags::{ErrorHandling, FlagSet};
use crate::usage::{self, Context, Template};

/// Top-level usage shown when no command, or an unknown one, is given.
pub const DEFAULT_USAGE: &str = "
Usage:

  {Program} [flags] <command> [arguments...]

Flags:

  {PrintDefaults}

Commands:

  {PrintCommands}
";

/// Narrowest width of the name column in command listings.
const MIN_NAME_COLUMN: usize = 16;

/// Commands in insertion order, unique by name.
pub struct CommandSet {
    commands: Vec<Box<dyn Command>>,
    usage: Cow<'static, str>,
}

impl CommandSet {
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
            usage: Cow::Borrowed(DEFAULT_USAGE),
        }
    }

    /// Replace the top-level usage template.
    pub fn with_usage(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.set_usage(template);
        self
    }

    pub fn set_usage(&mut self, template: impl Into<Cow<'static, str>>) {
        self.usage = template.into();
    }

    pub fn usage_template(&self) -> &str {
        &self.usage
    }

    /// Append `cmd` unless a command with the same name exists; the first
    /// registration wins and later ones are silently ignored.
    pub fn add(&mut self, cmd: Box<dyn Command>) {
        if self.lookup(cmd.name()).is_some() {
            debug!(name = cmd.name(), "command already registered, ignoring");
            return;
        }
        debug!(name = cmd.name(), "command registered");
        self.commands.push(cmd);
    }

    /// First command named `name`, scanning in insertion order.
    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|cmd| cmd.name() == name)
            .map(|cmd| cmd.as_ref())
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut dyn Command> {
        self.commands
            .iter_mut()
            .find(|cmd| cmd.name() == name)
            .map(|cmd| cmd.as_mut() as &mut dyn Command)
    }

    /// Call `f` for every command in insertion order.
    pub fn visit(&self, mut f: impl FnMut(&dyn Command)) {
        for cmd in &self.commands {
            f(cmd.as_ref());
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.commands.iter().map(|cmd| cmd.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Parse `arguments` and run the selected command, exiting the process on failure.
    ///
    /// Failures of the top-level flag parse follow the policy of `flags`: with
    /// `ContinueOnError` the flag error is returned, with `PanicOnError` this
    /// panics, otherwise the process exits. Every other failure exits with
    /// status 1.
    pub fn parse(&mut self, flags: &mut dyn FlagSet, arguments: &[String]) -> Result<(), FlagError> {
        let policy = flags.error_handling();
        let Err(err) = self.dispatch(flags, arguments, &mut io::stderr()) else {
            return Ok(());
        };
        let code = err.exit_code();
        match (err, policy) {
            (DispatchError::Flags(e), ErrorHandling::ContinueOnError) => Err(e),
            (DispatchError::Flags(e), ErrorHandling::PanicOnError) => panic!("{e}"),
            _ => process::exit(code),
        }
    }

    /// Dispatch without exiting; all reports go to `stderr`.
    ///
    /// 1. `arguments` are parsed against `flags`.
    /// 2. The first positional argument selects a command by name.
    /// 3. The command parses the remaining arguments; on failure the error and
    ///    the command's usage are reported.
    /// 4. The command runs; on failure the error is reported.
    ///
    /// A missing or unknown command reports the top-level usage.
    #[instrument(level = "debug", skip_all)]
    pub fn dispatch(
        &mut self,
        flags: &mut dyn FlagSet,
        arguments: &[String],
        stderr: &mut dyn Write,
    ) -> Result<(), DispatchError> {
        let args = match flags.parse(arguments) {
            Ok(args) => args,
            Err(e) => {
                if !e.is_help() {
                    report(stderr, &e);
                }
                self.write_top_usage(&*flags, stderr);
                return Err(e.into());
            }
        };

        let Some(name) = args.first() else {
            debug!("no command given");
            self.write_top_usage(&*flags, stderr);
            return Err(DispatchError::MissingCommand);
        };

        let Some(index) = self.commands.iter().position(|cmd| cmd.name() == name.as_str()) else {
            debug!(command = %name, "no such command");
            report(stderr, &format!("invalid command: {name}"));
            self.write_top_usage(&*flags, stderr);
            return Err(DispatchError::InvalidCommand(name.clone()));
        };

        debug!(command = %name, arguments = ?&args[1..], "dispatching");
        let cmd = &mut self.commands[index];
        if let Err(source) = cmd.parse(&args[1..]) {
            if !source.is_help() {
                report(stderr, &source);
            }
            cmd.usage();
            return Err(DispatchError::Parse {
                command: name.clone(),
                source,
            });
        }
        if let Err(source) = cmd.run() {
            report(stderr, &source);
            return Err(DispatchError::Run {
                command: name.clone(),
                source,
            });
        }
        Ok(())
    }

    /// Print a usage message listing this set's commands to standard error.
    ///
    /// # Panics
    ///
    /// Panics if `template` does not compile; usage templates are program text.
    pub fn print_usage(&self, flags: &dyn FlagSet, template: &str) {
        let template = usage::compile(template);
        if let Err(e) = template.render(&self.usage_context(flags), &mut io::stderr().lock()) {
            warn!("cannot print usage: {}", e);
        }
    }

    /// Render a usage message listing this set's commands into `out`.
    pub fn write_usage(
        &self,
        flags: &dyn FlagSet,
        template: &str,
        out: &mut dyn Write,
    ) -> UsageResult<()> {
        Template::parse(template)?.render(&self.usage_context(flags), out)
    }

    /// Listed commands as aligned `name  description` rows, trimmed.
    ///
    /// All rows share one name column, so descriptions line up across the listing.
    pub fn listing(&self) -> String {
        let mut rows: Vec<(String, String)> = Vec::new();
        self.visit(|cmd| {
            if !cmd.description().is_empty() {
                rows.push((cmd.name().to_string(), cmd.description().to_string()));
            }
        });
        let width = rows
            .iter()
            .map(|(name, _)| name.chars().count() + 4)
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_COLUMN);

        let mut out = String::new();
        for (name, description) in rows {
            let cell = format!("  {name}");
            out.push_str(&format!("{cell:<width$}{description}\n"));
        }
        out.trim().to_string()
    }

    fn usage_context<'a>(&'a self, flags: &'a dyn FlagSet) -> Context<'a> {
        usage::flags_context(flags).with_commands(move || self.listing())
    }

    fn write_top_usage(&self, flags: &dyn FlagSet, out: &mut dyn Write) {
        let template = usage::compile(&self.usage);
        if let Err(e) = template.render(&self.usage_context(flags), out) {
            warn!("cannot print usage: {}", e);
        }
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSet")
            .field("commands", &self.names())
            .field("usage", &self.usage)
            .finish()
    }
}

fn report(stderr: &mut dyn Write, err: &dyn fmt::Display) {
    if let Err(e) = writeln!(stderr, "{err}") {
        warn!("cannot report error: {}", e);
    }
}
