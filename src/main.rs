//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::content::{split_tags, PostDraft};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Content engine for a portfolio and blog", long_about = None)]
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
    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Explicit id (defaults to a slug of the title)
        #[arg(long)]
        id: Option<String>,

        /// Short summary
        #[arg(short, long, default_value = "")]
        excerpt: String,

        /// Comma separated tags
        #[arg(short, long, default_value = "")]
        tags: String,

        /// Category (Dev, MICE)
        #[arg(long)]
        category: Option<String>,

        /// Cover image URL
        #[arg(long)]
        cover_image: Option<String>,

        /// Read the markdown body from this file
        #[arg(long)]
        content_file: Option<PathBuf>,
    },

    /// List site content
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print one post as JSON
    Show {
        /// Post id
        id: String,
    },

    /// Parse every post and report malformed files
    Check,

    /// Start the content server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
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
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    match cli.command {
        Commands::New {
            title,
            id,
            excerpt,
            tags,
            category,
            cover_image,
            content_file,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            let content = match content_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {:?}", path))?,
                None => String::new(),
            };
            tracing::info!("Creating new post with title: {}", title);
            let draft = PostDraft {
                id,
                title,
                excerpt,
                content,
                tags: split_tags(&tags),
                category: category.unwrap_or_default(),
                cover_image,
            };
            folio::commands::new::create_post(&site, draft)?;
        }

        Commands::List { r#type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type)?;
        }

        Commands::Show { id } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&site, &id)?;
        }

        Commands::Check => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::check::run(&site)?;
        }

        Commands::Server { port, ip } => {
            let site = folio::Folio::new(&base_dir)?;
            let port = port.unwrap_or(site.config.server.port);
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
