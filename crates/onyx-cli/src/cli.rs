//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Onyx - profile and plugin resolution for the formatter
#[derive(Parser, Debug)]
#[command(name = "onyx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List available profiles with origin and parent
    ListProfiles,

    /// Show a profile's effective (inherited) settings
    ShowProfile {
        /// Profile name
        name: String,
    },

    /// List discovered plugins with descriptions and default options
    ListPlugins {
        /// Additional plugin discovery directory (repeatable)
        #[arg(long = "plugin-path")]
        plugin_paths: Vec<PathBuf>,
    },

    /// Resolve the run configuration and print the outcome
    ///
    /// Examples:
    ///   onyx resolve --profile pycharm
    ///   onyx resolve -S line_length=100 -S preview=true
    ///   onyx resolve --plugin import_sorter:group_stdlib=false
    ///   onyx resolve --disable-all-plugins --plugin import_sorter
    Resolve {
        /// Profile to apply on top of the defaults
        #[arg(short, long)]
        profile: Option<String>,

        /// Setting override as key=value (repeatable)
        #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
        settings: Vec<String>,

        /// Enable a plugin, optionally with options:
        /// NAME[:OPT1=VALUE1,OPT2=VALUE2,...] (repeatable)
        #[arg(long = "plugin", value_name = "NAME[:OPTS]")]
        plugins: Vec<String>,

        /// Explicitly disable a specific plugin (repeatable)
        #[arg(long = "disable-plugin", value_name = "NAME")]
        disable_plugins: Vec<String>,

        /// Run without any plugins enabled
        #[arg(long = "disable-all-plugins")]
        disable_all: bool,

        /// Do not enable plugins that nothing explicitly enables
        #[arg(long = "no-default-enable")]
        no_default_enable: bool,

        /// Additional plugin discovery directory (repeatable)
        #[arg(long = "plugin-path")]
        plugin_paths: Vec<PathBuf>,
    },
}
