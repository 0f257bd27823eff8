mod cli;
mod config;
mod gemini_client;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::controller::ChatController;
use crate::cli::chat::ChatContext;
use crate::cli::page::chrome::PageState;
use crate::cli::page::{self, PageView};
use crate::config::Config;
use crate::gemini_client::AssistantClient;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Ask a single question and print the answer
    #[arg(short, long)]
    input: Option<String>,

    /// Gemini model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the page and talk to the assistant
    Chat {
        /// Ask a single question and print the answer
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the page once
    Page {
        /// Print the page view-model as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Lumina");

    let input = match cli.command {
        Some(Commands::Page { json }) => return print_page(json),
        Some(Commands::Chat { input }) => input.or(cli.input),
        None => cli.input,
    };

    let config = Config::from_env().with_model(cli.model);
    let chat = ChatController::new(AssistantClient::from_config(&config));

    let interactive = input.is_none();
    let mut chat_context = ChatContext::new(Box::new(io::stdout()), input, interactive, chat);
    chat_context.run().await
}

fn print_page(json: bool) -> Result<ExitCode> {
    let state = PageState::default();
    let mut stdout = io::stdout();

    if json {
        let view = PageView::new(&state);
        writeln!(stdout, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        let width = crossterm::terminal::size()
            .map(|(cols, _)| usize::from(cols).clamp(40, 100))
            .unwrap_or(80);
        page::write_lines(&mut stdout, &page::render_page(&state, width))?;
    }

    Ok(ExitCode::SUCCESS)
}
