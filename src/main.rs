use clap::{Parser, Subcommand};
use flex_context::{Change, ContextDefinition, ContextManager, ManagerConfig, QueryString};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Resolve flexibility contexts from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Log matching decisions (debug level)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ids of the active context definitions as a JSON array.
    Resolve {
        /// JSON file holding an array of context definitions
        #[arg(long)]
        definitions: PathBuf,
        /// Manager configuration (JSON); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// URL or query string to read override parameters from
        #[arg(long)]
        url: Option<String>,
    },
    /// Print whether a change applies under the given active contexts.
    Applies {
        /// Change as JSON, e.g. '{"context":"A"}'
        #[arg(long)]
        change: String,
        /// Comma separated active context ids
        #[arg(long, default_value = "")]
        active: String,
    },
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Resolve { definitions, config, url } => {
            let raw = std::fs::read_to_string(&definitions)
                .unwrap_or_else(|e| fail(format!("Cannot read {}: {e}", definitions.display())));
            let defs: Vec<ContextDefinition> =
                serde_json::from_str(&raw).unwrap_or_else(|e| fail(format!("Invalid definitions: {e}")));

            let cfg = match config {
                Some(path) => ManagerConfig::load(&path).unwrap_or_else(|e| fail(e)),
                None => ManagerConfig::default(),
            };
            let query = QueryString::parse(url.as_deref().unwrap_or(""));
            let manager = ContextManager::from_config(&cfg, Arc::new(query)).unwrap_or_else(|e| fail(e));

            let active = futures::executor::block_on(manager.resolve_active_contexts(&defs))
                .unwrap_or_else(|e| fail(e));
            match serde_json::to_string(&active) {
                Ok(out) => println!("{out}"),
                Err(e) => fail(e),
            }
        }
        Command::Applies { change, active } => {
            let change: Change =
                serde_json::from_str(&change).unwrap_or_else(|e| fail(format!("Invalid change: {e}")));
            let active = active
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>();
            println!("{}", flex_context::is_definition_applicable(&change, &active));
        }
    }
}
