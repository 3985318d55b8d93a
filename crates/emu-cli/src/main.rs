//! emu - remote Android emulator control
//!
//! # Examples
//!
//! ```bash
//! # Start the emulator and wait until its display answers
//! emu start
//!
//! # Show the reconciled status as JSON
//! emu status --json
//!
//! # Talk to a different backend
//! emu --server http://10.0.0.5:8080 stop
//! ```

use emu_cli::Cli;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    emu_cli::run(cli).await
}
