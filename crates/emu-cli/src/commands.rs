use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Reconcile with the backend and print the emulator status
    Status,

    /// Start the emulator and follow its boot until it is reachable
    Start {
        /// Return as soon as the backend acknowledges the start
        #[arg(long)]
        no_wait: bool,
    },

    /// Stop the emulator
    Stop,

    /// Check whether the backend can run containers
    CheckDocker,

    /// Interactive session: type start, stop, status or quit
    Console,
}
