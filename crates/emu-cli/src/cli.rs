use crate::commands::Commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "emu")]
#[command(about = "Start, watch and stop the remote Android emulator")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides api.base_url from config.toml)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Config directory (defaults to $EMU_CONFIG_DIR or ./.emu)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Echo logs at the configured level to stderr (warnings only otherwise)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
