//! relay CLI: runs the Telegram bot. Config comes from the environment (.env
//! supported); the token flag overrides BOT_TOKEN.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use handler_chain::HandlerChain;
use middleware::{is_production, LoggerConfig, RequestLogger};
use relay_core::init_tracing;
use relay_telegram::{build_bot, run_dispatcher, TelegramConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Telegram bot with request logging", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run(token).await,
    }
}

async fn run(token: Option<String>) -> Result<()> {
    let config = match token {
        Some(token) => TelegramConfig::with_token(token),
        None => TelegramConfig::from_env()?,
    };

    init_tracing(is_production(), config.log_file.as_deref())?;

    let chain =
        HandlerChain::new().add_middleware(Arc::new(RequestLogger::new(LoggerConfig::from_env())));
    // Handler registration stays disabled until the bot grows real business logic:
    // let chain = handlers::setup_handlers(chain);

    let bot = build_bot(&config)?;
    info!("Bot started");
    run_dispatcher(bot, chain).await
}
