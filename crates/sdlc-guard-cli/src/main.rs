//! Host adapter and inspection commands for sdlc-guard.
//!
//! ```sh
//! # Speak the JSON-lines protocol on stdin/stdout
//! sdlc-guard serve --project /path/to/project
//!
//! # See how paths are classified
//! sdlc-guard classify src/widget.ts src/widget.test.ts src/types.ts
//!
//! # Tool definitions and the system prompt block
//! sdlc-guard tools
//! sdlc-guard prompt
//! ```
//!
//! Logs go to stderr. The filter comes from `--log-level`, then
//! `SDLC_GUARD_LOG`, then defaults to `sdlc_guard=info`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sdlc_guard::config::GuardConfig;
use sdlc_guard::enforce::system_prompt_block;
use sdlc_guard_cli::{Adapter, serve};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_ENV: &str = "SDLC_GUARD_LOG";
const DEFAULT_LOG_FILTER: &str = "sdlc_guard=info,sdlc_guard_cli=info";

/// TDD phase-boundary enforcement for coding agents.
#[derive(Parser)]
#[command(name = "sdlc-guard", version)]
struct Cli {
    /// Project root; `.sdlc/guard.json` is read from here and edit paths
    /// under it are classified relative to it.
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,

    /// Explicit config file (overrides the project config).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `sdlc_guard=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read host payloads from stdin, one JSON object per line.
    Serve {
        /// Validate tool arguments against their JSON Schemas.
        #[arg(long)]
        validate_args: bool,
    },
    /// Print the class of each path.
    Classify {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the tool definitions as JSON.
    Tools,
    /// Print the system prompt block.
    Prompt,
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn load_config(cli: &Cli) -> GuardConfig {
    let config = match &cli.config {
        Some(path) => GuardConfig::load(path),
        None => GuardConfig::load_from_project(&cli.project),
    };
    let root = std::path::absolute(&cli.project).unwrap_or_else(|_| cli.project.clone());
    config.project_root(root)
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(&cli);
    match cli.command {
        Command::Serve { validate_args } => {
            let adapter = Adapter::new(config)?.with_arg_validation(validate_args);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            serve(&adapter, stdin, tokio::io::stdout()).await?;
        }
        Command::Classify { paths } => {
            let classifier = config.build_classifier()?;
            for path in paths {
                println!("{}\t{path}", classifier.classify(&path));
            }
        }
        Command::Tools => {
            let adapter = Adapter::new(config)?;
            let defs = adapter.tools().definitions();
            let json = serde_json::to_string_pretty(&defs)
                .map_err(|e| format!("failed to serialize tool definitions: {e}"))?;
            println!("{json}");
        }
        Command::Prompt => println!("{}", system_prompt_block()),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
