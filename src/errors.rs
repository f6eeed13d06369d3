//! Error types for every layer of the crate

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::exitcode;

/// Errors reported by a flag namespace while parsing arguments.
#[derive(Error, Debug)]
pub enum FlagError {
    /// `-h` or `--help` was given.
    #[error("help requested")]
    Help,

    #[error("{0}")]
    Invalid(String),
}

impl FlagError {
    pub fn is_help(&self) -> bool {
        matches!(self, FlagError::Help)
    }
}

/// Errors returned by a command's `parse` or `run`.
#[derive(Error, Debug)]
pub enum CommandError {
    /// An incorrect number of arguments was passed to a command.
    #[error("wrong number of arguments")]
    NArg,

    #[error("{0}")]
    Flags(#[from] FlagError),

    #[error("{0}")]
    Env(#[from] EnvError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A generator panicked; the payload message is kept.
    #[error("{0}")]
    Panicked(String),

    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    /// Whether the command's flags asked for help rather than failed.
    pub fn is_help(&self) -> bool {
        matches!(self, CommandError::Flags(FlagError::Help))
    }

    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Outcome of a failed dispatch. By the time this is returned the failure has
/// already been reported to the error stream.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("{0}")]
    Flags(#[from] FlagError),

    #[error("no command given")]
    MissingCommand,

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("{source}")]
    Parse {
        command: String,
        #[source]
        source: CommandError,
    },

    #[error("{source}")]
    Run {
        command: String,
        #[source]
        source: CommandError,
    },
}

impl DispatchError {
    /// Get the process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::Flags(FlagError::Help) => exitcode::OK,
            DispatchError::Parse { source, .. } if source.is_help() => exitcode::OK,
            DispatchError::Flags(_) => exitcode::USAGE,
            DispatchError::MissingCommand
            | DispatchError::InvalidCommand(_)
            | DispatchError::Parse { .. }
            | DispatchError::Run { .. } => exitcode::FAILURE,
        }
    }
}

/// Errors found while compiling a usage template.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder {{{name}}} at byte {offset}")]
    UnknownPlaceholder { name: String, offset: usize },

    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),

    #[error("unexpected '}}' at byte {0}")]
    StrayBrace(usize),
}

/// Errors raised while rendering usage.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("invalid usage template: {0}")]
    Template(#[from] TemplateError),

    #[error("{0} is not available in this usage context")]
    Unavailable(&'static str),

    #[error("failed to write usage: {0}")]
    Io(#[from] io::Error),
}

/// Errors from environment variable lookups.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvError {
    #[error("environment variable not set: ${0}")]
    NotPresent(String),

    #[error("environment variable is not valid unicode: ${0}")]
    NotUnicode(String),
}

/// Errors from loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type CommandResult<T> = Result<T, CommandError>;
pub type UsageResult<T> = Result<T, UsageError>;
pub type SettingsResult<T> = Result<T, SettingsError>;
