//! BharatCart CLI - account and analytics tools for the seller dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Register a seller (handle is the business name, lowercased, no spaces)
//! bc-cli register -o "Arjun Sharma" -b "Sharma Co" -p pw1
//!
//! # Log in and print the dashboard summary, with AI insights
//! bc-cli login -u sharmaco -p pw1 --insights
//!
//! # Write the analytics downloads to the current directory
//! bc-cli export csv
//! bc-cli export json --out reports/
//! ```
//!
//! # Commands
//!
//! - `register` - Add an account to the credential registry
//! - `login` - Authenticate and summarize the session
//! - `export` - Write the analytics CSV or JSON report
//!
//! Set `BHARATCART_LOG_JSON=1` for JSON log lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "bc-cli")]
#[command(author, version, about = "BharatCart Admin CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a seller account
    Register {
        /// Owner's full name
        #[arg(short, long)]
        owner: String,

        /// Business name; the login handle is derived from it
        #[arg(short, long)]
        business: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Log in and print the dashboard summary
    Login {
        /// Login handle (`demo` for the sample account)
        #[arg(short = 'u', long)]
        handle: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Also fetch AI business insights
        #[arg(long)]
        insights: bool,
    },
    /// Write an analytics export
    Export {
        /// Export format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// Monthly revenue series as CSV
    Csv,
    /// Revenue series and channel split as JSON
    Json,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bharatcart_admin=info,bc_cli=info".into());

    let json = std::env::var("BHARATCART_LOG_JSON").is_ok();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Register {
            owner,
            business,
            password,
        } => {
            commands::account::register(&owner, &business, &password).await?;
        }
        Commands::Login {
            handle,
            password,
            insights,
        } => {
            commands::account::login(&handle, &password, insights).await?;
        }
        Commands::Export { format, out } => match format {
            ExportFormat::Csv => {
                commands::export::csv(&out).await?;
            }
            ExportFormat::Json => {
                commands::export::json(&out).await?;
            }
        },
    }
    Ok(())
}
