//! Command implementations for onyx-cli

use crate::discovery;
use crate::error::{CliError, Result};
use colored::Colorize;
use onyx_config::{CliIntent, ConfigResolver, PluginFlag, ResolvedConfig};
use onyx_plugins::{Diagnostic, PluginRegistry};
use onyx_profiles::{ProfileStore, resolve};
use std::path::{Path, PathBuf};

/// List all catalog profiles with origin and parent.
pub fn run_list_profiles(project_root: &Path) -> Result<()> {
    let store = load_store(project_root)?;
    println!("{}", "Profiles:".bold());
    for profile in store.iter() {
        let parent = profile
            .parent
            .as_deref()
            .map(|p| format!(" (inherits {p})"))
            .unwrap_or_default();
        println!(
            "  {:<12} {:<9} {}{}",
            profile.name.green(),
            format!("[{}]", profile.origin),
            profile.description,
            parent.dimmed()
        );
    }
    Ok(())
}

/// Show one profile's effective settings after inheritance.
pub fn run_show_profile(project_root: &Path, name: &str) -> Result<()> {
    let store = load_store(project_root)?;
    let effective = resolve(name, &store)?;
    println!("{} {}", "Effective settings for".bold(), name.green().bold());
    for (key, value) in effective.iter() {
        println!("  {key} = {}", value.to_toml());
    }
    Ok(())
}

/// List discovered plugins in registration order.
pub fn run_list_plugins(project_root: &Path, extra_paths: &[PathBuf]) -> Result<()> {
    let (registry, diagnostics) = load_registry(project_root, extra_paths)?;
    println!("{}", "Plugins:".bold());
    for descriptor in registry.iter() {
        let state = match descriptor.enabled {
            Some(true) => "enabled".green(),
            Some(false) => "disabled".red(),
            None => "default".dimmed(),
        };
        println!(
            "  {:<20} {:<8} {} ({})",
            descriptor.name.green(),
            descriptor.version,
            descriptor.description,
            state
        );
        for (key, value) in &descriptor.default_options {
            println!("      {key} = {value}");
        }
    }
    report_diagnostics(&diagnostics);
    Ok(())
}

/// Options for the `resolve` command, straight from the parsed arguments.
pub struct ResolveArgs {
    pub profile: Option<String>,
    pub settings: Vec<String>,
    pub plugins: Vec<String>,
    pub disable_plugins: Vec<String>,
    pub disable_all: bool,
    pub no_default_enable: bool,
    pub plugin_paths: Vec<PathBuf>,
}

/// Resolve the full run configuration and print it.
pub fn run_resolve(project_root: &Path, args: ResolveArgs) -> Result<()> {
    let intent = build_intent(&args)?;
    let store = load_store(project_root)?;
    let (registry, diagnostics) = load_registry(project_root, &args.plugin_paths)?;
    let file_config = discovery::plugins_file_config(project_root)?;

    let config = ConfigResolver::new(&store, &registry, &file_config, &intent).resolve()?;
    print_resolved(&config);
    report_diagnostics(&diagnostics);
    Ok(())
}

/// Translate raw argument strings into the engine's structured intent.
fn build_intent(args: &ResolveArgs) -> Result<CliIntent> {
    let mut settings = Vec::new();
    for spec in &args.settings {
        let (key, value) = spec
            .split_once('=')
            .ok_or_else(|| CliError::user(format!("expected KEY=VALUE, got '{spec}'")))?;
        settings.push((key.trim().to_string(), value.trim().to_string()));
    }

    let plugins = args
        .plugins
        .iter()
        .map(|spec| PluginFlag::parse(spec))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(CliIntent {
        profile: args.profile.clone(),
        settings,
        plugins,
        disable_plugins: args.disable_plugins.clone(),
        disable_all: args.disable_all,
        enable_by_default: args.no_default_enable.then_some(false),
        discovery_paths: args.plugin_paths.clone(),
    })
}

fn load_store(project_root: &Path) -> Result<ProfileStore> {
    let sources = discovery::profile_sources(project_root)?;
    Ok(ProfileStore::load(sources)?)
}

fn load_registry(
    project_root: &Path,
    extra_paths: &[PathBuf],
) -> Result<(PluginRegistry, Vec<Diagnostic>)> {
    let (candidates, mut diagnostics) = discovery::plugin_candidates(project_root, extra_paths)?;
    let (registry, mut validation) = PluginRegistry::discover(candidates);
    diagnostics.append(&mut validation);
    Ok((registry, diagnostics))
}

fn print_resolved(config: &ResolvedConfig) {
    println!("{}", "Settings:".bold());
    for (key, value) in config.settings.iter() {
        println!("  {key} = {}", value.to_toml());
    }
    println!("{}", "Plugins:".bold());
    for plugin in &config.plugins {
        let state = if plugin.enabled {
            "enabled".green()
        } else {
            "disabled".red()
        };
        println!("  {:<20} {}", plugin.name, state);
        for (key, value) in &plugin.options {
            println!("      {key} = {value}");
        }
    }
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        eprintln!("{}: {diag}", "warning".yellow().bold());
    }
}
