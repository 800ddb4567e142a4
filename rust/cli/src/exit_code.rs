//! Process exit codes returned by [`crate::run`].

/// Command finished normally.
pub const SUCCESS: i32 = 0;

/// Bad arguments, bad configuration, I/O failure or engine fault.
pub const ERROR: i32 = 2;

/// Session stopped before its round budget was spent.
pub const INTERRUPTED: i32 = 130;
