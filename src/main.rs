//! CLI entry point for quillsite

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quillsite::theme::{Theme, ThemePreference};

#[derive(Parser)]
#[command(name = "quillsite")]
#[command(author = "quillsite developers")]
#[command(version)]
#[command(about = "A small blog engine with an RSS feed", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post (prompted for when omitted)
        title: Option<String>,

        /// Do not open the new post in an editor
        #[arg(long)]
        no_edit: bool,
    },

    /// Generate the RSS feed
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4321")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Remove generated files
    Clean,

    /// List posts, newest first
    List {
        /// Show at most this many posts
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the stored preference and the effective theme
    Show {
        /// System color scheme to resolve against
        #[arg(long, default_value = "light")]
        system: Theme,
    },

    /// Store a preference: light, dark or system
    Set {
        preference: ThemePreference,

        /// System color scheme to resolve against
        #[arg(long, default_value = "light")]
        system: Theme,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quillsite=debug,info"
    } else {
        "quillsite=info"
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
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            quillsite::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, no_edit } => {
            let site = quillsite::Site::new(&base_dir)?;
            quillsite::commands::new::run(&site, title.as_deref(), !no_edit)?;
        }

        Commands::Generate { watch } => {
            let site = quillsite::Site::new(&base_dir)?;
            tracing::info!("Generating feed...");

            let path = quillsite::commands::generate::run(&site)?;
            println!("Generated {:?}", path);

            if watch {
                quillsite::commands::generate::watch(&site)?;
            }
        }

        Commands::Server { port, ip } => {
            let site = quillsite::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            quillsite::server::start(&site, &ip, port).await?;
        }

        Commands::Clean => {
            let site = quillsite::Site::new(&base_dir)?;
            quillsite::commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }

        Commands::List { limit, json } => {
            let site = quillsite::Site::new(&base_dir)?;
            quillsite::commands::list::run(&site, limit, json)?;
        }

        Commands::Theme { action } => {
            let site = quillsite::Site::new(&base_dir)?;
            match action {
                ThemeAction::Show { system } => {
                    quillsite::commands::theme::show(&site, system)?;
                }
                ThemeAction::Set { preference, system } => {
                    quillsite::commands::theme::set(&site, preference, system)?;
                }
            }
        }

        Commands::Version => {
            println!("quillsite version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
