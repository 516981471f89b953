use anyhow::Result;
use clap::{Parser, Subcommand};
use nutrimcp::config::API_KEY_SIGNUP_URL;
use nutrimcp::{desktop, ConfigLoader, FoodSource, McpServer, NutritionError, UsdaClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// USDA nutrition lookups for Model Context Protocol
///
/// Serves nutrition tools to MCP clients over stdio. Requires a free
/// FoodData Central API key in USDA_API_KEY.
#[derive(Parser, Debug)]
#[command(name = "nutrimcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file to use instead of the default search locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server on stdio (default)
    Serve,

    /// Print the Claude Desktop configuration for this binary
    DesktopConfig,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries the protocol, so logs never go there
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

fn print_desktop_config() -> Result<()> {
    let command = std::env::current_exe()?;
    let config_path = desktop::config_path();
    println!("{}", desktop::render(&command, config_path.as_deref()));
    Ok(())
}

async fn serve(config: Option<PathBuf>) -> Result<()> {
    let loader = ConfigLoader::new(config.as_deref())?;
    match loader.source() {
        Some(path) => info!("Using config file {}", path.display()),
        None => info!("No config file, using built-in defaults"),
    }

    let usda_config = match loader.usda_config() {
        Ok(config) => config,
        Err(e @ NutritionError::MissingApiKey(_)) => {
            eprintln!("ERROR: {}", e);
            eprintln!("Get a free key at: {}", API_KEY_SIGNUP_URL);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    info!("API key found, using {}", usda_config.base_url);

    let client: Arc<dyn FoodSource> = Arc::new(UsdaClient::new(usda_config)?);
    let mcp_server = McpServer::new(client);

    info!("nutrimcp server starting - ready to accept MCP requests on stdio");

    // Run MCP server (this blocks until client disconnects)
    match mcp_server.run().await {
        Ok(()) => {
            info!("MCP server stopped normally");
            Ok(())
        }
        Err(e) => {
            eprintln!("MCP server error: {}", e);
            Err(e)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file)?;

    info!("Starting nutrimcp v{}", env!("CARGO_PKG_VERSION"));

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(args.config).await,
        Command::DesktopConfig => print_desktop_config(),
    }
}
