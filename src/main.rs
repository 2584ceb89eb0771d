//! CLI entry point for bloglist

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bloglist")]
#[command(version)]
#[command(about = "A small blog listing backend", long_about = None)]
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
    /// Start the API server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List stored content
    List {
        /// Type of content to list (blog, user)
        #[arg(default_value = "blog")]
        r#type: String,
    },

    /// Print like and author statistics
    Stats,

    /// Delete the data file
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "bloglist=debug,info"
    } else {
        "bloglist=info"
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
            let app = bloglist::Bloglist::new(&base_dir)?;
            let port = port.unwrap_or(app.config.port);
            let ip = ip.unwrap_or_else(|| app.config.ip.clone());

            tracing::info!("Starting server at http://{}:{}", ip, port);
            bloglist::server::start(&app, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let app = bloglist::Bloglist::new(&base_dir)?;
            bloglist::commands::list::run(&app, &r#type).await?;
        }

        Commands::Stats => {
            let app = bloglist::Bloglist::new(&base_dir)?;
            bloglist::commands::stats::run(&app).await?;
        }

        Commands::Clean => {
            let app = bloglist::Bloglist::new(&base_dir)?;
            tracing::info!("Cleaning data file...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("bloglist version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
