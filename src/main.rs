//! product-loader - fetch a product record and render it into a page.

use anyhow::Result;
use clap::{Parser, Subcommand};
use product_loader::commands::LoadCommand;
use product_loader::config::{Config, OutputFormat};
use product_loader::loader::{
    FALLBACK_DESCRIPTION, FALLBACK_IMAGE, FALLBACK_PRICE, FALLBACK_TITLE,
};
use product_loader::page::{PRODUCT_DESCRIPTION, PRODUCT_IMAGE, PRODUCT_PRICE, PRODUCT_TITLE};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "product-loader",
    version,
    about = "Fetch a product record and render it into a page",
    long_about = "Issues a single GET against a product endpoint and writes the image, title, \
                  description and price into the page's presentation targets."
)]
struct Cli {
    /// Product endpoint URL
    #[arg(short, long, global = true, env = "PRODUCT_ENDPOINT")]
    endpoint: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "PRODUCT_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the product and render it into the page
    #[command(alias = "l")]
    Load {
        /// JSON file holding the page's prior state
        #[arg(short, long)]
        page: Option<PathBuf>,

        /// Write the resulting page back to --page
        #[arg(long, requires = "page")]
        save: bool,
    },

    /// List the presentation targets the loader writes
    Targets,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Load { page, save } => {
            let cmd = LoadCommand::new(config);
            let output = cmd.execute(page.as_deref(), save).await?;
            println!("{}", output);
        }

        Commands::Targets => {
            println!("Presentation targets:\n");
            println!("{:<20} {:<6} {:<16}", "ID", "Kind", "Fallback");
            println!("{:-<20} {:-<6} {:-<16}", "", "", "");

            let targets = [
                (PRODUCT_IMAGE, "image", FALLBACK_IMAGE.to_string()),
                (PRODUCT_TITLE, "text", FALLBACK_TITLE.to_string()),
                (PRODUCT_DESCRIPTION, "text", FALLBACK_DESCRIPTION.to_string()),
                (PRODUCT_PRICE, "text", format!("${}", FALLBACK_PRICE)),
            ];

            for (id, kind, fallback) in targets {
                println!("{:<20} {:<6} {:<16}", id, kind, fallback);
            }
        }
    }

    Ok(())
}
