//! # `kodebase-config`
//!
//! Command-line front end for Kodebase git automation settings.
//!
//! ```sh
//! kodebase-config init --preset small_team
//! kodebase-config validate
//! kodebase-config show --project-root ../other-repo
//! ```
//!
//! See `kodebase-config --help` for all subcommands and options.

use clap::Parser as _;
use kodebase_config::cli::Args;
use kodebase_config::error::KodebaseError;
use kodebase_config::system::RealSystem;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let args = Args::parse();

    // Output goes to stdout, so only errors are logged unless asked otherwise
    let log_level = if args.verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let system = RealSystem::new();
    match kodebase_config::run(&args, &system) {
        Ok(output) => {
            println!("{}", output.trim_end());
            std::process::exit(0);
        }
        Err(err) => {
            error!("{}", err);
            std::process::exit(
                err.downcast_ref::<KodebaseError>()
                    .map_or(1, KodebaseError::exit_code),
            );
        }
    }
}
