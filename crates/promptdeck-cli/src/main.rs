use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use promptdeck_cli::config::{self, Deck};
use promptdeck_cli::prompt::TermPrompter;
use promptdeck_core::{TokenIndex, render_help};

/// `Promptdeck` interactive command runner.
#[derive(Debug, Parser)]
#[command(name = "promptdeck", version, about)]
struct Cli {
    /// Deck file with defaults, overrides, and custom commands
    #[arg(long, env = "PROMPTDECK_DECK", global = true, value_name = "FILE")]
    deck: Option<PathBuf>,

    /// Emit JSON log lines instead of the human-readable format
    #[arg(long, env = "PROMPTDECK_LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the resolved command summary
    List,
    /// Validate the deck file and report the outcome
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let deck = config::load(cli.deck.as_deref())?;
    match cli.command {
        Some(Commands::List) => list(deck),
        Some(Commands::Check) => check(deck),
        None => run(deck),
    }
}

fn run(deck: Deck) -> Result<()> {
    deck.into_dispatcher(TermPrompter)?.run()?;
    Ok(())
}

fn list(deck: Deck) -> Result<()> {
    let dispatcher = deck.into_dispatcher(TermPrompter)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{}", render_help(dispatcher.commands(), dispatcher.defaults()));
    }
    Ok(())
}

fn check(deck: Deck) -> Result<()> {
    let dispatcher = deck.into_dispatcher(TermPrompter)?;
    let index = TokenIndex::build(dispatcher.commands(), dispatcher.defaults());
    #[allow(clippy::print_stdout)]
    {
        println!(
            "deck OK: {} commands, {} tokens",
            dispatcher.commands().len(),
            index.len()
        );
    }
    Ok(())
}

fn init_tracing(log_json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "promptdeck=info".into()),
    );
    if log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
