//! yhteys MCP Server & CLI
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Implements three tools:
//! - `search(query, ...filters)` - Fuzzy search startups
//! - `suggest()` - Popular search suggestions
//! - `filters()` - Distinct filter values

use anyhow::Result;
use clap::Parser;
use tracing::info;
use yhteys_search::cli::{self, Cli, Commands};
use yhteys_search::config::{load_config, SearchConfig};
use yhteys_search::error::AppError;
use yhteys_search::mcp;
use yhteys_search::tools::{self, ToolContext};

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode()
    } else {
        run_mcp_mode().await
    }
}

/// Log to stderr so stdout carries only tool output
fn init_logging(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_search_config(path: Option<&std::path::Path>) -> Result<SearchConfig, AppError> {
    load_config(path).map_err(|e| AppError::ConfigError(format!("{:#}", e)))
}

/// Run in CLI mode
fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    init_logging(log_level);

    let command = match cli.command {
        Some(command) => command,
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    let result = load_search_config(cli.config.as_deref())
        .and_then(|config| execute_command(command, config));

    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn execute_command(command: Commands, config: SearchConfig) -> Result<String, AppError> {
    let output = match command {
        Commands::Search(args) => {
            let ctx = ToolContext::resolve(config, &args.catalog)?;
            tools::search::execute_search(&ctx, args)?
        }
        Commands::Suggest(args) => {
            let ctx = ToolContext::resolve(config, &args.catalog)?;
            tools::suggest::execute_suggest(&ctx, args)?
        }
        Commands::Filters(args) => {
            let ctx = ToolContext::resolve(config, &args.catalog)?;
            tools::filters::execute_filters(&ctx, args)?
        }
    };
    Ok(output.into_text())
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    init_logging("info");

    info!("Starting yhteys MCP Server");

    let config = load_search_config(None)?;
    let ctx = ToolContext::resolve(config, &cli::CatalogArgs::default())?;

    mcp::handle_stdio(&ctx).await?;

    Ok(())
}
