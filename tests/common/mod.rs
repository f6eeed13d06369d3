//! Shared test doubles

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cmdset::command::Command;
use cmdset::errors::{CommandError, CommandResult};

/// Calls made on mock commands, in order, e.g. `build.parse(-o,out)`.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Command that records every call and fails on demand.
pub struct MockCommand {
    name: String,
    description: String,
    journal: Journal,
    parse_error: bool,
    run_error: bool,
}

impl MockCommand {
    pub fn new(name: &str, description: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            journal: Arc::clone(journal),
            parse_error: false,
            run_error: false,
        }
    }

    pub fn failing_parse(mut self) -> Self {
        self.parse_error = true;
        self
    }

    pub fn failing_run(mut self) -> Self {
        self.run_error = true;
        self
    }

    pub fn boxed(self) -> Box<dyn Command> {
        Box::new(self)
    }

    fn record(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }
}

impl Command for MockCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn usage(&self) {
        self.record(format!("{}.usage", self.name));
    }

    fn parse(&mut self, arguments: &[String]) -> CommandResult<()> {
        self.record(format!("{}.parse({})", self.name, arguments.join(",")));
        if self.parse_error {
            return Err(CommandError::NArg);
        }
        Ok(())
    }

    fn run(&mut self) -> CommandResult<()> {
        self.record(format!("{}.run", self.name));
        if self.run_error {
            return Err(CommandError::Failed(format!("{} failed", self.name)));
        }
        Ok(())
    }
}
