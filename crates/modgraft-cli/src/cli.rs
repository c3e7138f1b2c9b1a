//! CLI argument definitions for modgraft.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "modgraft",
    version,
    about = "Fold one Go module manifest into another",
    long_about = "modgraft merges the require, replace and exclude directives of a source go.mod \
                  into a destination go.mod, keeping the destination as close to its original \
                  form as possible. The merged manifest is written to stdout."
)]
pub struct Cli {
    /// Destination go.mod file
    #[arg(long, env = "MODGRAFT_DEST", value_name = "FILE")]
    pub dest: Option<PathBuf>,

    /// Source go.mod file (the module being absorbed)
    #[arg(long, env = "MODGRAFT_SRC", value_name = "FILE")]
    pub src: Option<PathBuf>,

    /// Take the source version whenever the manifests disagree
    #[arg(long, env = "MODGRAFT_FORCE_OVERWRITE")]
    pub force_overwrite: bool,

    /// Read defaults from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not print merge decisions
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
