//! Filesystem discovery of profile and plugin records
//!
//! The engine crates never touch the filesystem; this module is the
//! collaborator that walks the conventional per-origin locations, parses
//! the TOML records, and hands the results over in increasing precedence
//! order:
//!
//! 1. built-in (embedded catalog)
//! 2. system   (`/usr/share/onyx/`)
//! 3. user     (`<config_dir>/onyx/`)
//! 4. project  (`./.onyx/`, plus `--plugin-path` directories)
//!
//! Within one tier, files are visited in sorted-path order so name
//! collisions resolve deterministically (last path wins).

use crate::error::Result;
use onyx_config::PluginsFileConfig;
use onyx_plugins::{DescriptorCandidate, Diagnostic, PluginRecord};
use onyx_profiles::{Origin, Profile, ProfileRecord};
use std::fs;
use std::path::{Path, PathBuf};

const SYSTEM_DIR: &str = "/usr/share/onyx";
const PROJECT_DIR: &str = ".onyx";

/// Tier root directories that exist, lowest precedence first.
fn tier_dirs(project_root: &Path) -> Vec<(Origin, PathBuf)> {
    let mut tiers = Vec::new();
    tiers.push((Origin::System, PathBuf::from(SYSTEM_DIR)));
    if let Some(config_dir) = dirs::config_dir() {
        tiers.push((Origin::User, config_dir.join("onyx")));
    }
    tiers.push((Origin::Project, project_root.join(PROJECT_DIR)));
    tiers
}

/// TOML files directly under `dir`, sorted by path.
fn toml_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::debug!(?dir, "tier directory absent, skipping");
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    files
}

/// Load profile records from every tier, in increasing precedence order,
/// ready for `ProfileStore::load`.
pub fn profile_sources(project_root: &Path) -> Result<Vec<(Origin, Vec<Profile>)>> {
    let mut sources = vec![(Origin::BuiltIn, onyx_profiles::builtin_profiles())];
    for (origin, dir) in tier_dirs(project_root) {
        let mut profiles = Vec::new();
        for path in toml_files(&dir.join("profiles")) {
            let content = fs::read_to_string(&path)?;
            let profile = ProfileRecord::parse(&content)?.into_profile(origin)?;
            tracing::debug!(?path, name = %profile.name, %origin, "loaded profile");
            profiles.push(profile);
        }
        sources.push((origin, profiles));
    }
    Ok(sources)
}

/// Collect plugin descriptor candidates from every tier plus any extra
/// directories (treated as project-tier, highest precedence).
///
/// A file that fails to parse becomes an `InvalidPlugin` diagnostic, not
/// an error: one broken manifest must not block the other plugins.
pub fn plugin_candidates(
    project_root: &Path,
    extra_paths: &[PathBuf],
) -> Result<(Vec<DescriptorCandidate>, Vec<Diagnostic>)> {
    let mut dirs: Vec<(Origin, PathBuf)> = tier_dirs(project_root)
        .into_iter()
        .map(|(origin, dir)| (origin, dir.join("plugins")))
        .collect();
    for path in extra_paths {
        dirs.push((Origin::Project, path.clone()));
    }

    let mut candidates = Vec::new();
    let mut diagnostics = Vec::new();
    for (origin, dir) in dirs {
        for path in toml_files(&dir) {
            let content = fs::read_to_string(&path)?;
            match PluginRecord::parse(&content) {
                Ok(record) => {
                    candidates.push(record.into_candidate(origin, path.display().to_string()));
                }
                Err(err) => diagnostics.push(Diagnostic::InvalidPlugin {
                    source: path.display().to_string(),
                    reason: err.to_string(),
                }),
            }
        }
    }
    Ok((candidates, diagnostics))
}

/// Load the project's `[plugins]` config (`.onyx/plugins.toml`), or the
/// defaults when absent.
pub fn plugins_file_config(project_root: &Path) -> Result<PluginsFileConfig> {
    let path = project_root.join(PROJECT_DIR).join("plugins.toml");
    if !path.is_file() {
        return Ok(PluginsFileConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    Ok(PluginsFileConfig::parse(&content)?)
}
