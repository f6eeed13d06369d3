//! Commands of the `cmdset` binary, driven through the registry

mod common;

use std::env;
use std::fs;

use rstest::rstest;
use tempfile::TempDir;

use cmdset::cli::commands::{EnvCommand, VersionCommand, WriteCommand};
use cmdset::cli::{self, global_flags};
use cmdset::command::{Command, CommandSet};
use cmdset::config::Settings;
use cmdset::errors::{CommandError, DispatchError, EnvError};
use cmdset::util::testing;

use common::args;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[rstest]
#[case(&["extra"])]
#[case(&["a", "b"])]
fn given_arguments_when_version_parse_then_narg(#[case] arguments: &[&str]) {
    let mut cmd = VersionCommand::new("1.2.3");
    assert!(matches!(cmd.parse(&args(arguments)), Err(CommandError::NArg)));
}

#[rstest]
fn given_no_names_when_env_parse_then_narg() {
    let mut cmd = EnvCommand::new();
    assert!(matches!(cmd.parse(&[]), Err(CommandError::NArg)));
}

#[rstest]
fn given_set_variable_when_env_lines_then_formatted() {
    env::set_var("CMDSET_CLI_TEST_SET", "on");
    let mut cmd = EnvCommand::new();

    cmd.parse(&args(&["CMDSET_CLI_TEST_SET"])).unwrap();
    assert_eq!(cmd.lines().unwrap(), args(&["CMDSET_CLI_TEST_SET=on"]));

    cmd.parse(&args(&["-e", "CMDSET_CLI_TEST_SET"])).unwrap();
    assert_eq!(cmd.lines().unwrap(), args(&["export CMDSET_CLI_TEST_SET=on"]));
}

#[rstest]
fn given_missing_variable_when_env_run_then_env_error() {
    let mut cmd = EnvCommand::new();
    cmd.parse(&args(&["CMDSET_CLI_TEST_MISSING"])).unwrap();

    let err = cmd.run().unwrap_err();
    assert!(matches!(
        err,
        CommandError::Env(EnvError::NotPresent(ref name)) if name == "CMDSET_CLI_TEST_MISSING"
    ));
}

#[rstest]
fn given_output_flag_when_write_run_then_file_written() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out.txt");
    let target_arg = target.display().to_string();
    let mut cmd = WriteCommand::new("-");

    cmd.parse(&args(&["-o", &target_arg, "hello", "world  "])).unwrap();
    assert_eq!(cmd.output(), target_arg);
    cmd.run().unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "hello world\n");
}

#[rstest]
fn given_header_flag_when_write_contents_then_generated_marker_first() {
    let mut cmd = WriteCommand::new("-");
    cmd.parse(&args(&["--header", "body"])).unwrap();

    let contents = cmd.contents();
    assert!(contents.starts_with("// Code generated by \""), "{contents}");
    assert!(contents.contains("DO NOT EDIT."));
    assert!(contents.ends_with("\n\nbody"));
}

#[rstest]
fn given_settings_output_when_write_parse_then_default_used() {
    let mut cmd = WriteCommand::new("configured.txt");
    cmd.parse(&args(&["text"])).unwrap();
    assert_eq!(cmd.output(), "configured.txt");
}

#[rstest]
fn given_unwritable_output_when_write_run_then_io_error() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("missing").join("out.txt");
    let mut cmd = WriteCommand::new(&target.display().to_string());
    cmd.parse(&args(&["text"])).unwrap();

    let err = cmd.run().unwrap_err();
    assert!(matches!(err, CommandError::Io { .. }), "{err:?}");
    assert!(err.to_string().starts_with("write "));
}

#[rstest]
fn given_registered_binary_commands_when_dispatch_write_then_runs() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("dispatched.txt");
    let target_arg = target.display().to_string();
    let mut commands = CommandSet::new().with_usage(cli::USAGE);
    cli::register(&mut commands, &Settings::default(), "1.0.0");
    let mut flags = global_flags();
    let mut stderr = Vec::new();

    let result = commands.dispatch(
        &mut flags,
        &args(&["-d", "write", "-o", &target_arg, "dispatched"]),
        &mut stderr,
    );

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(flags.get_count("debug"), 1);
    assert_eq!(fs::read_to_string(&target).unwrap(), "dispatched\n");
}

#[rstest]
fn given_registered_binary_commands_when_env_without_names_then_parse_error() {
    let mut commands = CommandSet::new().with_usage(cli::USAGE);
    cli::register(&mut commands, &Settings::default(), "1.0.0");
    let mut flags = global_flags();
    let mut stderr = Vec::new();

    let err = commands
        .dispatch(&mut flags, &args(&["env"]), &mut stderr)
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Parse { ref command, source: CommandError::NArg } if command == "env"
    ));
    assert_eq!(String::from_utf8(stderr).unwrap(), "wrong number of arguments\n");
}
