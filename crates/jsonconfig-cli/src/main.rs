//! JsonConfig CLI
//!
//! Inspect and edit JSON config files from the command line.

use anyhow::Result;
use clap::Parser;
use jsonconfig_cli::{Command, run};
use jsonconfig_core::paths::default_config_path;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jsonconfig")]
#[command(about = "Inspect and edit JSON config files", long_about = None)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(&args.log_level)
        .init();

    let path = match args.file {
        Some(path) => path,
        None => default_config_path("jsonconfig")?,
    };
    tracing::debug!("Using config file {}", path.display());

    let mut stdout = std::io::stdout().lock();
    run(&args.command, &path, &mut stdout)
}
