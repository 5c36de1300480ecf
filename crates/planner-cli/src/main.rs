mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{task::TaskSubcommand, week::WeekSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "planner",
    about = "Personal task planner: schedule tasks, search them, review them week by week",
    version,
    propagate_version = true
)]
struct Cli {
    /// Planner root (default: auto-detect from .planner/)
    #[arg(long, global = true, env = "PLANNER_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .planner/ with a default config and an empty task list
    Init,

    /// Manage tasks
    Task {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },

    /// Find tasks whose title or description contains the query (case-insensitive)
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Weekly overview (Monday to Sunday)
    Week {
        #[command(subcommand)]
        subcommand: WeekSubcommand,
    },

    /// Serve the REST API
    Serve {
        /// Interface to bind (default: server.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: server.port from config, 0 = OS-assigned)
        #[arg(long, env = "PLANNER_PORT")]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Task { subcommand } => cmd::task::run(&root, subcommand, cli.json),
        Commands::Search { query } => cmd::task::search(&root, &query.join(" "), cli.json),
        Commands::Week { subcommand } => cmd::week::run(&root, subcommand, cli.json),
        Commands::Serve { host, port } => cmd::serve::run(&root, host, port),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
