//! `route-trie` command line.
//!
//! ```text
//! route-trie --config routes.toml check
//! route-trie --config routes.toml match GET /users/42
//! route-trie --config routes.toml serve --watch
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use route_trie::config::loader::load_table;
use route_trie::http::Resolution;
use route_trie::lifecycle::startup;
use route_trie::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "route-trie")]
#[command(about = "Build, inspect and serve a route table", long_about = None)]
struct Cli {
    /// Route table file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table and print the tree
    Check,
    /// Resolve one request and print the outcome as JSON
    Match {
        /// Request method, e.g. GET
        method: String,
        /// Request path, e.g. /users/42
        path: String,
    },
    /// Serve the route table over HTTP
    Serve {
        /// Reload the table when the file changes
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (config, table) = load_table(&cli.config)?;

    match cli.command {
        Commands::Check => {
            print!("{}", table.root());
            println!("{} routes OK", table.route_count());
        }
        Commands::Match { method, path } => {
            let resolution = Resolution::resolve(&table, &method, &path);
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        Commands::Serve { watch } => {
            init_logging(&config.observability.log_level);
            tracing::info!(
                config = %cli.config.display(),
                routes = table.route_count(),
                "route-trie v0.1.0 starting"
            );
            let watch_path = watch.then_some(cli.config.as_path());
            startup::serve(config, table, watch_path).await?;
        }
    }

    Ok(())
}
