//! CLI entrypoint for phishing URL verdict checks.

mod client;
mod config;
mod report;
mod service;
mod target;
mod types;

use std::io::IsTerminal;

use clap::{Parser, Subcommand};

use report::{VerdictReport, render_batch_report, render_report};
use service::PhishScoutService;

#[derive(Parser)]
#[command(
    name = "phish-scout",
    version,
    about = "Phishing verdict client for URLs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one URL (argument, or first line of piped stdin)
    Check {
        /// Target URL; read from stdin when omitted
        url: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },
    /// Classify every URL listed in a file, one per line
    Batch {
        /// Path to the URL list
        path: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let service = PhishScoutService::new()?;

    match cli.command {
        Commands::Check {
            url,
            json,
            no_color,
        } => {
            let report = match target::resolve_target(url) {
                Ok(url) => service.check_url(&url).await,
                Err(err) => {
                    // Target acquisition failure never aborts the run; it
                    // lands in the uniform error report with the placeholder
                    // shown where the URL would be.
                    tracing::warn!(error = %err, "target acquisition failed");
                    VerdictReport::failure(target::TARGET_PLACEHOLDER, service.endpoint())
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report(&report, use_color(no_color)));
            }
        }
        Commands::Batch {
            path,
            json,
            no_color,
        } => {
            let urls = service::read_url_list(&path)?;
            let report = service.check_batch(&urls).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_batch_report(&report, use_color(no_color)));
            }
        }
    }

    Ok(())
}

fn use_color(no_color_flag: bool) -> bool {
    !no_color_flag
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none()
}
