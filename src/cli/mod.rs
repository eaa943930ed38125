pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "islemler-api")]
#[command(about = "User registration, PDF report and mail relay API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Mint a bearer token signed with the configured key")]
    Token {
        #[arg(long, help = "Username to put in the token")]
        user: String,
        #[arg(long, help = "Lifetime in minutes (defaults to JWT_EXPIRY_MINUTES)")]
        minutes: Option<i64>,
    },
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(config).await,
        Commands::Token { user, minutes } => commands::token::handle(&config, &user, minutes),
    }
}
