//! Plugin invocation pipeline
//!
//! Invokes enabled plugins against each node in registration order and
//! returns the first non-deferred result. Plugins do not cooperatively
//! merge output; first match wins, so the outcome is deterministic for a
//! given configuration. An invocation failure is recorded and treated as
//! a deferral, so a single defective plugin never aborts formatting.
//!
//! Each formatting worker owns its own pipeline (the diagnostics buffer is
//! per-pipeline mutable state); the `ResolvedConfig`-derived inputs are
//! shared read-only.

use crate::diagnostics::Diagnostic;
use crate::options::PluginOptions;
use crate::plugin::{LineGen, Node, Plugin, PluginContext};
use onyx_profiles::SettingSet;
use std::collections::HashMap;

/// An ordered pipeline of configured plugin instances.
pub struct PluginPipeline {
    plugins: Vec<Box<dyn Plugin>>,
    context: PluginContext,
    diagnostics: Vec<Diagnostic>,
}

impl PluginPipeline {
    /// Build a pipeline from resolution output.
    ///
    /// `entries` is the resolved `(name, options, enabled)` list in
    /// registration order; `instances` are the host-constructed plugin
    /// values keyed by name. Disabled entries are skipped. An enabled
    /// entry without a matching instance, or an instance rejecting its
    /// options, is excluded with a diagnostic.
    pub fn build(
        entries: impl IntoIterator<Item = (String, PluginOptions, bool)>,
        instances: Vec<Box<dyn Plugin>>,
        settings: SettingSet,
    ) -> Self {
        let mut by_name: HashMap<String, Box<dyn Plugin>> = instances
            .into_iter()
            .map(|p| (p.name().to_string(), p))
            .collect();

        let mut plugins = Vec::new();
        let mut diagnostics = Vec::new();
        for (name, options, enabled) in entries {
            if !enabled {
                continue;
            }
            let Some(mut plugin) = by_name.remove(&name) else {
                diagnostics.push(Diagnostic::InvalidPlugin {
                    source: name.clone(),
                    reason: "no implementation registered for enabled plugin".to_string(),
                });
                continue;
            };
            match plugin.configure(&options) {
                Ok(()) => plugins.push(plugin),
                Err(err) => diagnostics.push(Diagnostic::InvalidPlugin {
                    source: name.clone(),
                    reason: format!("configuration rejected: {err}"),
                }),
            }
        }

        Self {
            plugins,
            context: PluginContext::new(settings),
            diagnostics,
        }
    }

    /// Apply the pipeline to one node.
    ///
    /// Returns the first plugin's non-deferred replacement lines, or
    /// `None` when every plugin defers and the caller should fall back to
    /// built-in formatting.
    pub fn apply(&mut self, node: &Node, line_gen: LineGen<'_>) -> Option<Vec<String>> {
        for plugin in &self.plugins {
            match plugin.apply(node, &self.context, line_gen) {
                Ok(Some(lines)) => {
                    tracing::debug!(plugin = plugin.name(), node = %node.path, "plugin replaced node output");
                    return Some(lines);
                }
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(
                        plugin = plugin.name(),
                        node = %node.path,
                        error = %err,
                        "plugin invocation failed, treating as deferral"
                    );
                    self.diagnostics.push(Diagnostic::PluginExecution {
                        plugin: plugin.name().to_string(),
                        node_path: node.path.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }
        None
    }

    /// Diagnostics accumulated so far (construction plus invocations).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Names of the active plugins, in invocation order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
