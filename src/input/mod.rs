//! Line-oriented command input.

pub mod command;
pub mod handler;

pub use command::{parse_args, parse_command, Command};
pub use handler::{CommandHandler, Flow};
