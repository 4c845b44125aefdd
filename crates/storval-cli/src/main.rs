//! storval CLI
//!
//! Command-line interface for validating storage resource descriptors

use clap::{Parser, Subcommand};
use storval_core::logging_facility::{init, Profile};
use storval_core::StorvalError;

mod commands;
mod config;

/// Descriptor accepted
pub const EXIT_ACCEPTED: i32 = 0;
/// Descriptor rejected with field errors
pub const EXIT_REJECTED: i32 = 1;
/// Input could not be read, decoded or configured
pub const EXIT_FAILURE: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "storval")]
#[command(about = "Validate storage resource descriptors", long_about = None)]
struct Cli {
    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a descriptor, or an update when --old is given
    Validate(commands::validate::ValidateArgs),
    /// List feature gates and their effective state
    Features(commands::features::FeaturesArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Production
    });

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Features(args) => commands::features::execute(args).map(|()| EXIT_ACCEPTED),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            match e.downcast_ref::<StorvalError>() {
                Some(err) => eprintln!("Error [{}]: {}", err.code(), err),
                None => eprintln!("Error: {}", e),
            }
            std::process::exit(EXIT_FAILURE);
        }
    }
}
