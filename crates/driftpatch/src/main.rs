use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "driftpatch")]
#[command(about = "Delta updater for game installs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a newer release is published
    Check {
        /// Repository owner
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// Install directory (defaults to the per-user data dir)
        #[arg(long)]
        install_root: Option<PathBuf>,
        /// Installed version override; skips reading the marker file
        #[arg(long)]
        current: Option<String>,
    },
    /// Download and apply the delta between two versions
    Apply {
        /// Repository owner
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// Version currently installed
        #[arg(long = "from")]
        base: String,
        /// Version to update to
        #[arg(long = "to")]
        target: String,
        /// Install directory (defaults to the per-user data dir)
        #[arg(long)]
        install_root: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            owner,
            repo,
            install_root,
            current,
        } => match commands::check::run(&owner, &repo, install_root, current.as_deref()) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        },
        Commands::Apply {
            owner,
            repo,
            base,
            target,
            install_root,
        } => match commands::apply::run(&owner, &repo, &base, &target, install_root) {
            Ok(()) => {
                println!("Patch applied successfully");
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        },
    }
}
