use clap::{Parser, Subcommand};
use projj::commands::*;
use projj::core::{error::Result, print_captured, print_error};
use std::env;

#[derive(Parser)]
#[command(name = "projj")]
#[command(about = "Manage a workspace of cloned repositories")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the configuration and show where repositories live
    Init,
    /// Clone a repository into the base directory and index it
    Add {
        /// Repository url (e.g. "github://org/repo", "git@host:org/repo.git")
        url: String,
    },
    /// Run a configured hook in the current directory
    Run {
        /// Hook name as configured under "hooks"
        hook: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let result = match cli.command {
        Commands::Init => execute_init(),
        Commands::Add { url } => execute_add(&url),
        Commands::Run { hook } => execute_run(&hook),
    };

    exit_on_error(result);
}

fn exit_on_error(result: Result<()>) {
    if let Err(e) = result {
        print_error(&e.to_string());
        if let Some(stderr) = e.captured_stderr() {
            print_captured(&stderr);
        }
        std::process::exit(1);
    }
}
