//! Commands of the `cmdset` binary

use clap::{Arg, ArgAction};
use tracing::{debug, instrument};

use crate::cli::output;
use crate::command::{Command, CommandSet};
use crate::config::Settings;
use crate::errors::{CommandError, CommandResult};
use crate::flags::{ClapFlags, ErrorHandling, FlagSet};
use crate::{generate, usage, util};

/// Register every command of the binary on `commands`.
pub fn register(commands: &mut CommandSet, settings: &Settings, version: &str) {
    commands.add(Box::new(VersionCommand::new(version)));
    commands.add(Box::new(EnvCommand::new()));
    commands.add(Box::new(WriteCommand::new(&settings.output)));
    commands.add(Box::new(ArgsCommand::new()));
}

/// Print the program version.
#[derive(Debug)]
pub struct VersionCommand {
    flags: ClapFlags,
    version: String,
}

impl VersionCommand {
    pub fn new(version: &str) -> Self {
        Self {
            flags: ClapFlags::new("version", ErrorHandling::ContinueOnError),
            version: version.to_string(),
        }
    }
}

impl Command for VersionCommand {
    fn name(&self) -> &str {
        "version"
    }

    fn description(&self) -> &str {
        "Print the program version"
    }

    fn usage(&self) {
        usage::print_usage(&self.flags, "Usage: {Program} {Name}");
    }

    fn parse(&mut self, arguments: &[String]) -> CommandResult<()> {
        if !self.flags.parse(arguments)?.is_empty() {
            return Err(CommandError::NArg);
        }
        Ok(())
    }

    fn run(&mut self) -> CommandResult<()> {
        output::info(&format!("{} {}", util::program(), self.version));
        Ok(())
    }
}

/// Print environment variables, failing on the first one that is not set.
#[derive(Debug)]
pub struct EnvCommand {
    flags: ClapFlags,
    names: Vec<String>,
}

impl EnvCommand {
    pub fn new() -> Self {
        Self {
            flags: ClapFlags::new("env", ErrorHandling::ContinueOnError).arg(
                Arg::new("export")
                    .short('e')
                    .long("export")
                    .action(ArgAction::SetTrue)
                    .help("Print as shell export statements"),
            ),
            names: Vec::new(),
        }
    }

    /// Lines printed by `run`.
    pub fn lines(&self) -> CommandResult<Vec<String>> {
        let prefix = if self.flags.get_flag("export") {
            "export "
        } else {
            ""
        };
        self.names
            .iter()
            .map(|name| -> CommandResult<String> {
                let value = util::env::lookup(name)?;
                Ok(format!("{prefix}{name}={value}"))
            })
            .collect()
    }
}

impl Default for EnvCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for EnvCommand {
    fn name(&self) -> &str {
        "env"
    }

    fn description(&self) -> &str {
        "Print environment variables"
    }

    fn usage(&self) {
        usage::print_usage(
            &self.flags,
            "
Usage: {Program} {Name} [flags] <variable...>

Flags:

  {PrintDefaults}
",
        );
    }

    fn parse(&mut self, arguments: &[String]) -> CommandResult<()> {
        let names = self.flags.parse(arguments)?;
        if names.is_empty() {
            return Err(CommandError::NArg);
        }
        self.names = names;
        Ok(())
    }

    #[instrument(level = "debug", skip(self), fields(names = ?self.names))]
    fn run(&mut self) -> CommandResult<()> {
        for line in self.lines()? {
            output::info(&line);
        }
        Ok(())
    }
}

/// Write text to a file or standard output, optionally marked as generated.
#[derive(Debug)]
pub struct WriteCommand {
    flags: ClapFlags,
    text: Vec<String>,
}

impl WriteCommand {
    pub fn new(default_output: &str) -> Self {
        Self {
            flags: ClapFlags::new("write", ErrorHandling::ContinueOnError)
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .default_value(default_output.to_string())
                        .help("Write output to FILE ('-' for standard output)"),
                )
                .arg(
                    Arg::new("header")
                        .long("header")
                        .action(ArgAction::SetTrue)
                        .help("Start with a generated-file header"),
                ),
            text: Vec::new(),
        }
    }

    pub fn output(&self) -> &str {
        self.flags.get_string("output").unwrap_or("-")
    }

    /// Text written by `run`.
    pub fn contents(&self) -> String {
        let mut body = String::new();
        if self.flags.get_flag("header") {
            body.push_str(&generate::header(&generate::args()));
            body.push_str("\n\n");
        }
        body.push_str(&self.text.join(" "));
        body
    }
}

impl Command for WriteCommand {
    fn name(&self) -> &str {
        "write"
    }

    fn description(&self) -> &str {
        "Write text to a file"
    }

    fn usage(&self) {
        usage::print_usage(
            &self.flags,
            "
Usage: {Program} {Name} [-o FILE] [--header] <text...>

Flags:

  {PrintDefaults}
",
        );
    }

    fn parse(&mut self, arguments: &[String]) -> CommandResult<()> {
        let text = self.flags.parse(arguments)?;
        if text.is_empty() {
            return Err(CommandError::NArg);
        }
        self.text = text;
        Ok(())
    }

    fn run(&mut self) -> CommandResult<()> {
        let output = self.output().to_string();
        debug!(output = %output, "writing");
        generate::guard(|| {
            generate::write_source(&output, &self.contents())
                .map_err(|e| CommandError::io(format!("write {output}"), e))
        })
    }
}

/// Print the command line. Unlisted.
#[derive(Debug)]
pub struct ArgsCommand {
    flags: ClapFlags,
}

impl ArgsCommand {
    pub fn new() -> Self {
        Self {
            flags: ClapFlags::new("args", ErrorHandling::ContinueOnError),
        }
    }
}

impl Default for ArgsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ArgsCommand {
    fn name(&self) -> &str {
        "args"
    }

    fn description(&self) -> &str {
        ""
    }

    fn usage(&self) {
        usage::print_usage(&self.flags, "Usage: {Program} {Name}");
    }

    fn parse(&mut self, arguments: &[String]) -> CommandResult<()> {
        self.flags.parse(arguments)?;
        Ok(())
    }

    fn run(&mut self) -> CommandResult<()> {
        output::info(&generate::args());
        Ok(())
    }
}
