//! Top-level configuration resolution
//!
//! Combines the profile catalog, the plugin registry, config-file plugin
//! overrides, and the CLI intent into one `ResolvedConfig`. The resolver
//! holds no state of its own; it is a pure function of the borrowed
//! inputs, which makes every precedence rule independently testable.
//!
//! Precedence for settings, lowest to highest: built-in `default` profile
//! chain, the selected profile's chain, CLI `key=value` overrides. CLI
//! always wins; this is an absolute rule, not an origin comparison.
//!
//! Enablement per plugin, highest rung wins:
//! CLI `--plugin` > CLI `--disable-plugin` > `disable_all` > config-file
//! `enabled` > descriptor `enabled` > global `enable_by_default`.

use crate::error::{Error, Result};
use crate::intent::{CliIntent, PluginsFileConfig};
use crate::resolved::{ResolvedConfig, ResolvedPlugin};
use onyx_plugins::{Error as PluginError, PluginDescriptor, PluginOptions, PluginRegistry, merged};
use onyx_profiles::{ProfileStore, SettingKey, SettingSet, SettingValue, resolver};
use std::collections::{HashMap, HashSet};

/// The name of the profile every run starts from.
pub const DEFAULT_PROFILE: &str = "default";

/// Resolves the final configuration from catalogs plus overrides.
///
/// Borrows everything; owns nothing. Construct, call [`resolve`], drop.
///
/// [`resolve`]: ConfigResolver::resolve
pub struct ConfigResolver<'a> {
    store: &'a ProfileStore,
    registry: &'a PluginRegistry,
    file_config: &'a PluginsFileConfig,
    intent: &'a CliIntent,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(
        store: &'a ProfileStore,
        registry: &'a PluginRegistry,
        file_config: &'a PluginsFileConfig,
        intent: &'a CliIntent,
    ) -> Self {
        Self {
            store,
            registry,
            file_config,
            intent,
        }
    }

    /// Produce the run's `ResolvedConfig`.
    ///
    /// Fails on configuration-authoring mistakes: unknown profiles or
    /// plugins, inheritance cycles, conflicting CLI flags, and option
    /// overrides outside a plugin's declared schema.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.check_enablement_conflicts()?;
        let settings = self.resolve_settings()?;
        let plugins = self.resolve_plugins()?;
        tracing::debug!(
            plugins = plugins.len(),
            enabled = plugins.iter().filter(|p| p.enabled).count(),
            "configuration resolved"
        );
        Ok(ResolvedConfig { settings, plugins })
    }

    /// A plugin named by both `--plugin` and `--disable-plugin` in one
    /// invocation is a usage error, surfaced before any precedence rule.
    fn check_enablement_conflicts(&self) -> Result<()> {
        let disabled: HashSet<&str> = self
            .intent
            .disable_plugins
            .iter()
            .map(String::as_str)
            .collect();
        for flag in &self.intent.plugins {
            if disabled.contains(flag.name.as_str()) {
                return Err(Error::ConflictingOverride {
                    subject: format!("plugin '{}'", flag.name),
                    detail: "both --plugin and --disable-plugin given".to_string(),
                });
            }
        }
        Ok(())
    }

    fn resolve_settings(&self) -> Result<SettingSet> {
        // Layer 1 - the built-in default chain, when the catalog has one.
        let mut effective = if self.store.contains(DEFAULT_PROFILE) {
            resolver::resolve(DEFAULT_PROFILE, self.store)?
        } else {
            SettingSet::new()
        };

        // Layer 2 - the selected profile's flattened chain.
        if let Some(name) = &self.intent.profile {
            if name != DEFAULT_PROFILE {
                effective = effective.merged(&resolver::resolve(name, self.store)?);
            }
        }

        // Layer 3 - CLI overrides, absolute.
        effective = effective.merged(&self.cli_settings()?);
        Ok(effective)
    }

    /// Type the raw CLI `key=value` pairs, rejecting repeated keys that
    /// disagree.
    fn cli_settings(&self) -> Result<SettingSet> {
        let mut raw_seen: HashMap<SettingKey, &str> = HashMap::new();
        let mut pairs = Vec::new();
        for (key, raw) in &self.intent.settings {
            let raw = raw.as_str();
            let key = SettingKey::from_name(key)?;
            let value = SettingValue::parse_for(key, raw)?;
            if let Some(previous) = raw_seen.insert(key, raw) {
                if previous != raw {
                    return Err(Error::ConflictingOverride {
                        subject: format!("setting '{key}'"),
                        detail: format!("given as both '{previous}' and '{raw}'"),
                    });
                }
            }
            pairs.push((key, value));
        }
        Ok(SettingSet::from_pairs(pairs))
    }

    fn resolve_plugins(&self) -> Result<Vec<ResolvedPlugin>> {
        // Explicitly enabled plugins must exist; a typo here is fatal, not
        // a silently inert flag.
        for flag in &self.intent.plugins {
            if !self.registry.contains(&flag.name) {
                return Err(PluginError::UnknownPlugin(flag.name.clone()).into());
            }
        }

        let cli_flags: HashMap<&str, &PluginOptions> = self
            .intent
            .plugins
            .iter()
            .map(|f| (f.name.as_str(), &f.options))
            .collect();

        let mut resolved = Vec::with_capacity(self.registry.len());
        for descriptor in self.registry.iter() {
            let name = descriptor.name.as_str();
            let file_override = self.file_config.plugins.get(name);

            let mut options = descriptor.default_options.clone();
            if let Some(file_override) = file_override {
                self.check_options(descriptor, &file_override.options)?;
                options = merged(&options, &file_override.options);
            }
            if let Some(cli_options) = cli_flags.get(name) {
                self.check_options(descriptor, cli_options)?;
                options = merged(&options, cli_options);
            }

            resolved.push(ResolvedPlugin {
                name: name.to_string(),
                options,
                enabled: self.enablement(descriptor),
            });
        }
        Ok(resolved)
    }

    /// The enablement ladder for one plugin; the first rung that applies
    /// decides.
    fn enablement(&self, descriptor: &PluginDescriptor) -> bool {
        let name = descriptor.name.as_str();
        if self.intent.plugins.iter().any(|f| f.name == name) {
            return true;
        }
        if self.intent.disable_plugins.iter().any(|n| n == name) {
            return false;
        }
        if self.intent.disable_all || self.file_config.disable_all {
            return false;
        }
        if let Some(enabled) = self.file_config.plugins.get(name).and_then(|o| o.enabled) {
            return enabled;
        }
        if let Some(enabled) = descriptor.enabled {
            return enabled;
        }
        self.intent
            .enable_by_default
            .unwrap_or(self.file_config.enable_by_default)
    }

    /// Validate an override set against the descriptor's declared schema:
    /// every key must exist among the defaults and carry a compatible
    /// type.
    fn check_options(&self, descriptor: &PluginDescriptor, overrides: &PluginOptions) -> Result<()> {
        for (key, value) in overrides {
            match descriptor.default_options.get(key) {
                None => {
                    return Err(Error::InvalidPluginOption {
                        plugin: descriptor.name.clone(),
                        key: key.clone(),
                        reason: "not in the plugin's declared options".to_string(),
                    });
                }
                Some(default) if !default.accepts(value) => {
                    return Err(Error::InvalidPluginOption {
                        plugin: descriptor.name.clone(),
                        key: key.clone(),
                        reason: format!(
                            "expected {}, found {}",
                            default.type_name(),
                            value.type_name()
                        ),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
