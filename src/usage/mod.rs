//! Template-based usage rendering for flag namespaces
//!
//! A usage template may reference:
//!
//! * `{Program}` - the base program name
//! * `{Name}` - the name of the flag namespace
//! * `{PrintDefaults}` - the defaults of every declared flag
//! * `{PrintCommands}` - names and descriptions of the listed commands
//!   (only when rendered through a `CommandSet`)

pub mod template;

use std::io::{self, Write};

use crate::errors::UsageResult;
use crate::flags::FlagSet;
use crate::util;

pub use template::{Context, Template};

/// Print a usage message for `flags` to standard error.
///
/// # Panics
///
/// Panics if `template` does not compile; usage templates are program text.
pub fn print_usage(flags: &dyn FlagSet, template: &str) {
    let template = compile(template);
    let context = flags_context(flags);
    if let Err(e) = template.render(&context, &mut io::stderr().lock()) {
        tracing::warn!("cannot print usage: {}", e);
    }
}

/// Render a usage message for `flags` into `out`.
pub fn write_usage(flags: &dyn FlagSet, template: &str, out: &mut dyn Write) -> UsageResult<()> {
    let template = Template::parse(template)?;
    template.render(&flags_context(flags), out)
}

pub(crate) fn compile(template: &str) -> Template {
    Template::parse(template).unwrap_or_else(|e| panic!("invalid usage template: {e}"))
}

pub(crate) fn flags_context(flags: &dyn FlagSet) -> Context<'_> {
    Context::new(util::program(), flags.name(), move || defaults(flags))
}

/// Captured `print_defaults` output, trimmed.
pub(crate) fn defaults(flags: &dyn FlagSet) -> String {
    let mut buf = Vec::new();
    if let Err(e) = flags.print_defaults(&mut buf) {
        tracing::warn!("cannot print flag defaults: {}", e);
    }
    String::from_utf8_lossy(&buf).trim().to_string()
}
