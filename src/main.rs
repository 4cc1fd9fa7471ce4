//! CLI entry point for blogfront

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogfront::cms::{CmsClient, ContentFetcher};
use blogfront::helpers::display_date;

#[derive(Parser)]
#[command(name = "blogfront")]
#[command(version)]
#[command(about = "A server-rendered blog front-end for headless content APIs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Fetch and print the first page of posts
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogfront=debug,info"
    } else {
        "blogfront=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let app = blogfront::Blogfront::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| app.config.server.ip.clone());
            let port = port.unwrap_or(app.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blogfront::server::start(&app, &ip, port).await?;
        }

        Commands::List => {
            let app = blogfront::Blogfront::new(&base_dir)?;
            let client = Arc::new(CmsClient::new(app.config.cms.clone())?);

            let page = client
                .fetch_first_page(app.config.cms.page_size, &app.config.cms.lang)
                .await?;

            for post in &page.posts {
                println!(
                    "{}  {}  ({})",
                    display_date(post.published_at.as_ref()),
                    post.title,
                    post.author
                );
            }
            println!(
                "{} post(s), more pages: {}",
                page.posts.len(),
                page.continuation_token.is_some()
            );
        }

        Commands::Version => {
            println!("blogfront version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
