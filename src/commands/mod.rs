mod config_cmd;
mod employee;
mod shell;

use clap::ValueEnum;
use std::fmt;

pub use config_cmd::ConfigCommand;
pub use employee::{CreateCommand, DeleteCommand, ListCommand, UpdateCommand};
pub use shell::ShellCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A failure the notifier has already shown to the user.
///
/// Only sets the exit status.
#[derive(Debug)]
pub struct AlreadyReported;

impl fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request failed")
    }
}

impl std::error::Error for AlreadyReported {}
