use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::context::CliContext;

#[derive(Parser)]
#[command(name = "pairwise")]
#[command(about = "Pairwise - compare videos and manage your rate-later queue", long_about = None)]
struct Cli {
    /// Directory holding config.toml and credentials.json
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an access token for later requests
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored access token
    Logout,
    /// Submit a comparison between two videos
    Compare(commands::compare::CompareArgs),
    /// Manage the rate-later queue
    RateLater {
        #[command(subcommand)]
        action: RateLaterAction,
    },
    /// Manage the visibility of your ratings
    Ratings {
        #[command(subcommand)]
        action: RatingsAction,
    },
    /// Show or change the client configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Change and save configuration values
    Set(commands::config::ConfigSetArgs),
}

#[derive(Subcommand)]
enum RateLaterAction {
    /// Queue a video (URL or identifier)
    Add { video: String },
    /// Show the queue
    List,
    /// Remove a video from the queue
    Remove { video: String },
}

#[derive(Subcommand)]
enum RatingsAction {
    /// Make one rating public or private
    Visibility {
        video: String,
        #[arg(long, conflicts_with = "private", required_unless_present = "private")]
        public: bool,
        #[arg(long)]
        private: bool,
    },
    /// Make every rating public or private
    VisibilityAll {
        #[arg(long, conflicts_with = "private", required_unless_present = "private")]
        public: bool,
        #[arg(long)]
        private: bool,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let context = CliContext::new(cli.config_dir.as_deref())?;

    match cli.command {
        Commands::Login { token } => commands::auth::login(&context, token).await?,
        Commands::Logout => commands::auth::logout(&context).await?,
        Commands::Compare(args) => commands::compare::run(&context, args).await?,
        Commands::RateLater { action } => match action {
            RateLaterAction::Add { video } => commands::rate_later::add(&context, &video).await?,
            RateLaterAction::List => commands::rate_later::list(&context).await?,
            RateLaterAction::Remove { video } => {
                commands::rate_later::remove(&context, &video).await?
            }
        },
        Commands::Ratings { action } => match action {
            RatingsAction::Visibility { video, public, .. } => {
                commands::ratings::set_visibility(&context, &video, public).await?
            }
            RatingsAction::VisibilityAll { public, .. } => {
                commands::ratings::set_all_visibility(&context, public).await?
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&context)?,
            ConfigAction::Set(args) => commands::config::set(&context, args)?,
        },
    }

    Ok(())
}
