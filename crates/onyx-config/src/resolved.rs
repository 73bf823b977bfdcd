//! The final resolved configuration
//!
//! A `ResolvedConfig` is built once per formatting run and never mutated
//! afterwards; workers share it by read-only reference.

use onyx_plugins::PluginOptions;
use onyx_profiles::SettingSet;

/// One plugin's resolved state: merged options plus final enablement,
/// in registry registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlugin {
    pub name: String,
    pub options: PluginOptions,
    pub enabled: bool,
}

/// The immutable, run-scoped merge of all settings and plugin states.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Effective formatter settings after profile and CLI merging.
    pub settings: SettingSet,
    /// All known plugins in registration order, enabled or not.
    pub plugins: Vec<ResolvedPlugin>,
}

impl ResolvedConfig {
    /// The enabled plugins, in invocation order.
    pub fn enabled_plugins(&self) -> impl Iterator<Item = &ResolvedPlugin> {
        self.plugins.iter().filter(|p| p.enabled)
    }

    /// Look up one plugin's resolved state.
    pub fn plugin(&self, name: &str) -> Option<&ResolvedPlugin> {
        self.plugins.iter().find(|p| p.name == name)
    }

    /// The `(name, options, enabled)` entries `PluginPipeline::build`
    /// consumes.
    pub fn pipeline_entries(&self) -> Vec<(String, PluginOptions, bool)> {
        self.plugins
            .iter()
            .map(|p| (p.name.clone(), p.options.clone(), p.enabled))
            .collect()
    }
}
