/// Main entry point for the Health Insights MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use health_insights_mcp::config;
use health_insights_mcp::HealthInsightsServer;

/// Command line arguments for the Health Insights MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, env = config::DATABASE_ENV)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "health_insights_mcp={}",
            config::log_level(args.debug, args.verbose)
        ))
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting Health Insights MCP server");

    let db_path = config::resolve_database_path(args.database)?;
    info!("Using database at: {}", db_path.display());

    let server = HealthInsightsServer::new(db_path).await?;
    server.run().await?;

    info!("Health Insights MCP server shutdown complete");
    Ok(())
}
