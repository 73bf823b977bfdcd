//! Onyx CLI
//!
//! Introspection and dry-run resolution for the formatter's profile and
//! plugin configuration.

mod cli;
mod commands;
mod discovery;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::ResolveArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} profile and plugin resolution", "onyx".green().bold());
            println!();
            println!("Run {} for available commands.", "onyx --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::ListProfiles => commands::run_list_profiles(&cwd),
        Commands::ShowProfile { name } => commands::run_show_profile(&cwd, &name),
        Commands::ListPlugins { plugin_paths } => commands::run_list_plugins(&cwd, &plugin_paths),
        Commands::Resolve {
            profile,
            settings,
            plugins,
            disable_plugins,
            disable_all,
            no_default_enable,
            plugin_paths,
        } => commands::run_resolve(
            &cwd,
            ResolveArgs {
                profile,
                settings,
                plugins,
                disable_plugins,
                disable_all,
                no_default_enable,
                plugin_paths,
            },
        ),
    }
}
