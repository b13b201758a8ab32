use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::draft::DraftArgs;
use commands::onboard::OnboardArgs;

#[derive(Parser)]
#[command(name = "creator")]
#[command(about = "Creator OS - daily content plans and drafts for creators", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config.toml and CREATOR_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your creator profile and start a session
    Onboard(OnboardArgs),
    /// Show your profile
    Profile,
    /// Show today's plan
    Plan {
        /// Generate a fresh plan, replacing today's
        #[arg(long)]
        generate: bool,
    },
    /// Generate hooks, a script and a caption
    Draft(DraftArgs),
    /// List previously generated content
    History {
        /// Show one entry in full
        #[arg(long)]
        expand: Option<String>,
    },
    /// Show the current session and backend
    Status,
    /// Forget the current session
    Logout,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let app = commands::App::build(cli.backend_url)?;

    match cli.command {
        Commands::Onboard(args) => commands::onboard::run(&app, args).await?,
        Commands::Profile => commands::account::profile(&app).await?,
        Commands::Plan { generate } => commands::plan::run(&app, generate).await?,
        Commands::Draft(args) => commands::draft::run(&app, args).await?,
        Commands::History { expand } => commands::history::run(&app, expand).await?,
        Commands::Status => commands::account::status(&app).await?,
        Commands::Logout => commands::account::logout(&app).await?,
    }

    Ok(())
}
