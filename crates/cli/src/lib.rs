//! cloudcall CLI library
//!
//! Shared by the `delete-alarms` and `decrypt-object` binaries, and exported
//! for tests.

pub mod commands;
pub mod exit_code;
pub mod logging;
pub mod output;
