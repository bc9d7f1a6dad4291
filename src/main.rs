//! ECS version audit CLI

use anyhow::Result;
use clap::Parser;
use glob_ecs_versions::cli::{self, Cli};
use glob_ecs_versions::search::FsReader;
use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let status = cli::run(cli.command, FsReader, io::stdout()).await?;
    Ok(ExitCode::from(status))
}
