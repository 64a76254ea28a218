use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a JSON list of chat messages and print the result
    Normalize {
        /// A JSON array of messages, or an object with a `messages` field
        file: PathBuf,
    },

    /// Build a completion event from a request/response pair and record it
    Record {
        /// Chat completion request body
        #[arg(long)]
        request: PathBuf,

        /// Chat completion response body
        #[arg(long)]
        response: PathBuf,

        /// Event name
        #[arg(long)]
        name: Option<String>,

        /// Print the event instead of recording it; needs no configuration
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Normalize { file } => commands::normalize::execute(&file),
        Command::Record {
            request,
            response,
            name,
            dry_run,
        } => commands::record::execute(&request, &response, name, dry_run).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
