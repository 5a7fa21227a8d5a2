use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use tourguide::assistant::reply_guarded;
use tourguide::{TourGuideConfig, TravelAssistant, logging, repl, web};

#[derive(Parser)]
#[command(name = "tourguide", version)]
#[command(about = "Travel assistant: weather and tourist attractions for any destination")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat (default)
    Chat,
    /// Answer a single question and exit
    Ask {
        /// The question, e.g. "Plan a trip to Lisbon, is it hot?"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TourGuideConfig::load_from_path(cli.config)?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging)?;

    let assistant = Arc::new(TravelAssistant::from_config(&config)?);

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            repl::run(assistant, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
        }
        Command::Ask { query } => {
            let reply = reply_guarded(assistant, query.join(" ")).await;
            println!("{reply}");
            Ok(())
        }
        Command::Serve { port } => web::run(assistant, port).await,
    }
}
