pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "boats-api")]
#[command(about = "Boats API - boats, loads and their owners over HTTP")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default)")]
    Serve,

    #[command(about = "Create the document table and its indexes")]
    Migrate,

    #[command(about = "Mint a development bearer token signed with OAUTH_DEV_SECRET")]
    Token {
        #[arg(long, help = "Subject (user id) the token identifies")]
        sub: String,
        #[arg(long, default_value_t = 24, help = "Hours until the token expires")]
        hours: i64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config().clone();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(config).await,
        Commands::Migrate => commands::migrate::handle(&config, output_format).await,
        Commands::Token { sub, hours } => commands::token::handle(&config, &sub, hours, output_format),
    }
}
