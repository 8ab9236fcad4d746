//! Websheet CLI
//!
//! Export a web page's content to an xlsx workbook, or serve exports over HTTP.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use websheet::{
    app_router, AppState, Category, ExportService, ExportStore, HttpFetcher, Preview,
    SelectionSet, ServiceConfig,
};

/// Websheet - web page to spreadsheet exporter
#[derive(Parser, Debug)]
#[command(name = "websheet")]
#[command(version)]
#[command(about = "Export web page content to xlsx workbooks")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Fetch timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// User-Agent sent with fetches
    #[arg(long, global = true)]
    user_agent: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one page and write its workbook
    Scrape {
        /// Page URL (https:// is assumed when no scheme is given)
        url: String,

        /// Categories to export, comma separated
        #[arg(short, long, default_value = "title,paragraphs,images,links,tables")]
        select: SelectionSet,

        /// Workbook path (default: a fresh name under the storage directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the preview as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP export server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<IpAddr>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory exports are written to
        #[arg(long)]
        storage_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ServiceConfig::from_env().context("Invalid environment configuration")?;
    if let Some(secs) = args.timeout_secs {
        config.fetch_timeout = Duration::from_secs(secs);
    }
    if let Some(agent) = args.user_agent {
        config.user_agent = agent;
    }

    match args.command {
        Command::Scrape {
            url,
            select,
            output,
            json,
        } => scrape(config, &url, &select, output, json).await,
        Command::Serve {
            host,
            port,
            storage_dir,
        } => {
            if let Some(host) = host {
                config.bind_addr = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(dir) = storage_dir {
                config.storage_dir = dir;
            }
            serve(config).await
        }
    }
}

async fn scrape(
    config: ServiceConfig,
    url: &str,
    selection: &SelectionSet,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let fetcher =
        HttpFetcher::with_options(config.fetch_options()).context("Failed to create fetcher")?;
    let service = ExportService::new(fetcher);

    let result = service
        .extract_and_build(url, selection)
        .await
        .with_context(|| format!("Failed to export {}", url))?;

    let written = match output {
        Some(path) => {
            tokio::fs::write(&path, &result.workbook)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path
        }
        None => {
            ExportStore::new(&config.storage_dir)
                .save(&result.workbook)
                .await
                .context("Failed to store workbook")?
                .path
        }
    };

    let preview = result.preview(selection);
    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        let document = &result.document;
        for category in selection.iter() {
            let count = match category {
                Category::Title => {
                    println!("Title: {}", document.title());
                    continue;
                }
                Category::Paragraphs => document.paragraphs().len(),
                Category::Images => document.images().len(),
                Category::Links => document.links().len(),
                Category::Tables => document.tables().len(),
            };
            if count == 0 {
                println!("{}", Preview::empty_message(category));
            } else {
                println!("{}: {}", category.label(), count);
            }
        }
    }

    tracing::info!("Workbook written to {}", written.display());
    Ok(())
}

async fn serve(config: ServiceConfig) -> Result<()> {
    let fetcher =
        HttpFetcher::with_options(config.fetch_options()).context("Failed to create fetcher")?;
    let state = Arc::new(AppState::new(
        ExportService::new(fetcher),
        ExportStore::new(&config.storage_dir),
    ));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        "Websheet server listening on {} (exports in {})",
        addr,
        config.storage_dir.display()
    );

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
