//! emu-cli library
//!
//! Command-line front end for the emulator lifecycle controller.

pub(crate) mod app;
pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod console;
pub(crate) mod error;
pub(crate) mod logging;
pub(crate) mod render;

#[cfg(test)]
mod tests;

pub use app::run;
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, CliResult};
