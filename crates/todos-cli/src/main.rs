use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

mod commands;
mod config;

use commands::{demo::DemoCommand, serve::ServeCommand};

#[derive(Parser)]
#[command(name = "todos", version, about = "Day-of-week todo lists over HTTP")]
struct Cli {
    /// Path to config file (default: search for todos.toml upwards)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the todos server
    Serve(ServeCommand),
    /// Post a sample week of todos to a scratch server and print them
    Demo(DemoCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => {
            let config = config::load_config(cli.config.as_deref())?;
            cmd.run(&config).await?
        }
        Commands::Demo(cmd) => cmd.run().await?,
    }

    Ok(())
}
