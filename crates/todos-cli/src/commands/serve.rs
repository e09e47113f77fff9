//! Serve command - run the todos server until interrupted.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use todos_server::{ServerConfig, TodoServer};

use crate::config::Config;

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (0 picks a free port)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Database file (`:memory:` keeps todos in memory)
    #[arg(long = "db", value_name = "PATH")]
    pub db: Option<PathBuf>,
}

impl ServeCommand {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let server = TodoServer::start(self.server_config(config)).await?;
        println!("todos listening on {}", server.url());

        tokio::signal::ctrl_c().await?;

        server.close()?;
        server.closed().await;
        Ok(())
    }

    /// Flags win over the config file.
    fn server_config(&self, config: &Config) -> ServerConfig {
        let mut server = config.server_config();
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
        if let Some(db) = &self.db {
            server.db_path = db.clone();
        }
        server
    }
}
