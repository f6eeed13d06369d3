//! Helpers for commands that generate source files

use std::any::Any;
use std::fs;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::errors::{CommandError, CommandResult};
use crate::util;

/// Command line of the running program, starting with the base program name.
pub fn args() -> String {
    util::args().join(" ")
}

/// Marker line for generated files.
pub fn header(args: &str) -> String {
    format!("// Code generated by \"{args}\"; DO NOT EDIT.")
}

/// Write `data` to the file `name`, or to standard output if `name` is `-`.
pub fn write_file(name: &str, data: &[u8]) -> io::Result<()> {
    if name == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data)?;
        return stdout.flush();
    }
    debug!(name, bytes = data.len(), "writing file");
    fs::write(name, data)
}

/// Like [`write_file`], but first strips trailing whitespace from every line
/// and ends the text with exactly one newline.
pub fn write_source(name: &str, data: &str) -> io::Result<()> {
    write_file(name, normalize(data).as_bytes())
}

fn normalize(data: &str) -> String {
    let mut out: String = data
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string();
    out.push('\n');
    out
}

/// Run a generator, turning a panic into [`CommandError::Panicked`].
pub fn guard<T>(f: impl FnOnce() -> CommandResult<T>) -> CommandResult<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(CommandError::Panicked(panic_message(payload.as_ref())))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "generator panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a  \nb\t\n\n\n", "a\nb\n")]
    #[case("", "\n")]
    #[case("x", "x\n")]
    #[case("  keep leading\n", "  keep leading\n")]
    fn given_source_when_normalize_then_trailing_whitespace_dropped(
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn given_args_when_header_then_marker_line() {
        assert_eq!(
            header("gen -o out.rs"),
            "// Code generated by \"gen -o out.rs\"; DO NOT EDIT."
        );
    }

    #[test]
    fn given_panicking_generator_when_guard_then_error() {
        let result: CommandResult<()> = guard(|| panic!("missing $OUTPUT_DIR"));
        match result {
            Err(CommandError::Panicked(msg)) => assert_eq!(msg, "missing $OUTPUT_DIR"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn given_formatted_panic_when_guard_then_message_kept() {
        let name = "OUTPUT";
        let result: CommandResult<()> = guard(|| panic!("missing ${name}"));
        assert!(matches!(result, Err(CommandError::Panicked(msg)) if msg == "missing $OUTPUT"));
    }

    #[test]
    fn given_succeeding_generator_when_guard_then_value() {
        assert_eq!(guard(|| Ok(42)).unwrap(), 42);
    }
}
