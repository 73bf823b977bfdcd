//! Structured CLI intent and config-file plugin overrides
//!
//! The argument parser (an external collaborator) produces a `CliIntent`;
//! the config-file layer produces a `PluginsFileConfig`. Resolution is a
//! pure function of these values plus the catalogs; there is no ambient
//! global state.

use crate::error::{Error, Result};
use onyx_plugins::{OptionValue, PluginOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One `--plugin NAME[:OPT=VALUE,...]` flag: an explicit enable with
/// optional option overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginFlag {
    pub name: String,
    pub options: PluginOptions,
}

impl PluginFlag {
    /// Parse the `name:opt1=v1,opt2=v2` flag syntax.
    ///
    /// Values are coerced the same way config-file values are typed:
    /// booleans, integers, floats, then strings.
    pub fn parse(spec: &str) -> Result<Self> {
        let (name, rest) = match spec.split_once(':') {
            Some((name, rest)) => (name.trim(), Some(rest)),
            None => (spec.trim(), None),
        };
        if name.is_empty() {
            return Err(Error::InvalidPluginFlag {
                flag: spec.to_string(),
                reason: "empty plugin name".to_string(),
            });
        }

        let mut options = PluginOptions::new();
        if let Some(rest) = rest {
            for pair in rest.split(',').filter(|p| !p.trim().is_empty()) {
                let Some((key, value)) = pair.split_once('=') else {
                    return Err(Error::InvalidPluginOption {
                        plugin: name.to_string(),
                        key: pair.trim().to_string(),
                        reason: "expected OPT=VALUE".to_string(),
                    });
                };
                options.insert(key.trim().to_string(), OptionValue::coerce(value.trim()));
            }
        }
        Ok(Self {
            name: name.to_string(),
            options,
        })
    }
}

/// The structured command-line intent for one run.
#[derive(Debug, Clone)]
pub struct CliIntent {
    /// Selected profile, if any.
    pub profile: Option<String>,
    /// Raw `key=value` setting overrides; typed during resolution so a bad
    /// value is reported against its key.
    pub settings: Vec<(String, String)>,
    /// Explicit `--plugin` enables with option overrides.
    pub plugins: Vec<PluginFlag>,
    /// Explicit `--disable-plugin` names.
    pub disable_plugins: Vec<String>,
    /// `--disable-all-plugins`.
    pub disable_all: bool,
    /// Override for the enable-by-default policy; `None` leaves the
    /// config-file value in force.
    pub enable_by_default: Option<bool>,
    /// Plugin discovery paths, handed to the filesystem walk.
    pub discovery_paths: Vec<PathBuf>,
}

impl Default for CliIntent {
    fn default() -> Self {
        Self {
            profile: None,
            settings: Vec::new(),
            plugins: Vec::new(),
            disable_plugins: Vec::new(),
            disable_all: false,
            enable_by_default: None,
            discovery_paths: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-plugin override from the config file's `[plugins.<name>]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PluginOverride {
    pub enabled: Option<bool>,
    #[serde(default)]
    pub options: PluginOptions,
}

/// The config file's `[plugins]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginsFileConfig {
    /// Force every plugin off (an explicit CLI `--plugin` still wins).
    #[serde(default)]
    pub disable_all: bool,
    /// Whether plugins with no explicit enablement anywhere run.
    #[serde(default = "default_true")]
    pub enable_by_default: bool,
    /// Per-plugin overrides keyed by plugin name.
    #[serde(flatten)]
    pub plugins: BTreeMap<String, PluginOverride>,
}

impl Default for PluginsFileConfig {
    fn default() -> Self {
        Self {
            disable_all: false,
            enable_by_default: true,
            plugins: BTreeMap::new(),
        }
    }
}

impl PluginsFileConfig {
    /// Parse a `[plugins]` table body.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
