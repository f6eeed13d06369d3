//! Process exit codes used by dispatch

/// Successful termination
pub const OK: i32 = 0;

/// Missing or unknown command, or a command failed to parse or run
pub const FAILURE: i32 = 1;

/// Malformed top-level flags
pub const USAGE: i32 = 2;
