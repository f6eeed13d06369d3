//! Usage template compilation and rendering
//!
//! Templates are plain text with four placeholders: `{Program}`, `{Name}`,
//! `{PrintDefaults}` and `{PrintCommands}`. `{{` and `}}` produce literal braces.

use std::io::Write;

use crate::errors::{TemplateError, UsageError, UsageResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Program,
    Name,
    PrintDefaults,
    PrintCommands,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Program" => Some(Self::Program),
            "Name" => Some(Self::Name),
            "PrintDefaults" => Some(Self::PrintDefaults),
            "PrintCommands" => Some(Self::PrintCommands),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Value(Placeholder),
}

/// A compiled usage template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Compile `text`. The text is trimmed and given exactly one trailing newline.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let text = format!("{}\n", text.trim());
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::StrayBrace(offset)),
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, c)) if c != '{' && c != '\n' => name.push(c),
                            _ => return Err(TemplateError::Unterminated(offset)),
                        }
                    }
                    let placeholder = Placeholder::from_name(name.trim()).ok_or_else(|| {
                        TemplateError::UnknownPlaceholder {
                            name: name.trim().to_string(),
                            offset,
                        }
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Value(placeholder));
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Text(literal));
        }
        Ok(Self { segments })
    }

    /// Evaluate the template against `context`, writing to `out`.
    pub fn render(&self, context: &Context<'_>, out: &mut dyn Write) -> UsageResult<()> {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.write_all(text.as_bytes())?,
                Segment::Value(Placeholder::Program) => out.write_all(context.program.as_bytes())?,
                Segment::Value(Placeholder::Name) => out.write_all(context.name.as_bytes())?,
                Segment::Value(Placeholder::PrintDefaults) => {
                    out.write_all((context.print_defaults)().as_bytes())?
                }
                Segment::Value(Placeholder::PrintCommands) => {
                    let print_commands = context
                        .print_commands
                        .as_ref()
                        .ok_or(UsageError::Unavailable("PrintCommands"))?;
                    out.write_all(print_commands().as_bytes())?
                }
            }
        }
        Ok(())
    }
}

type Hook<'a> = Box<dyn Fn() -> String + 'a>;

/// Values and hooks a template is evaluated against; built fresh for every render.
pub struct Context<'a> {
    pub program: String,
    pub name: String,
    print_defaults: Hook<'a>,
    print_commands: Option<Hook<'a>>,
}

impl<'a> Context<'a> {
    pub fn new(
        program: impl Into<String>,
        name: impl Into<String>,
        print_defaults: impl Fn() -> String + 'a,
    ) -> Self {
        Self {
            program: program.into(),
            name: name.into(),
            print_defaults: Box::new(print_defaults),
            print_commands: None,
        }
    }

    /// Make `{PrintCommands}` available.
    pub fn with_commands(mut self, print_commands: impl Fn() -> String + 'a) -> Self {
        self.print_commands = Some(Box::new(print_commands));
        self
    }
}
