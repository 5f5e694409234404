use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod cmd;
pub mod profile;
pub mod scenario;
pub mod utils;

/// CLI arguments for configuring sitebench behavior.
#[derive(Debug, Clone, Parser)]
#[command(name = "sitebench")]
#[command(bin_name = "sitebench")]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmds: CliCommands,

    /// debug logging as default instead of Info; use RUST_LOG env for more options
    #[arg(long, short = 'v', default_value_t = false, global = true)]
    pub verbose: bool,

    /// enable pretty logging (format for humans)
    #[arg(long, default_value_t = false, global = true)]
    pub pretty: bool,

    /// write the tracing output to the provided (log) file instead of stderr
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
enum CliCommands {
    Run(self::cmd::run::RunCommand),
    Sample(self::cmd::sample::SampleCommand),
    Serve(self::cmd::serve::ServeCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    utils::telemetry::init_tracing(&args)?;

    match args.cmds {
        CliCommands::Run(run_args) => self::cmd::run::exec(run_args).await,
        CliCommands::Sample(sample_args) => self::cmd::sample::exec(sample_args).await,
        CliCommands::Serve(serve_args) => self::cmd::serve::exec(serve_args).await,
    }
}
