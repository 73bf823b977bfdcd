//! The plugin invocation contract
//!
//! A plugin is any value implementing [`Plugin`]: identity accessors plus
//! one `apply` entry point. There is no inheritance hierarchy; shared
//! helpers are composed at construction by the plugin itself.

use crate::error::Result;
use crate::options::PluginOptions;
use onyx_profiles::SettingSet;

/// The engine's view of one formatter AST node.
///
/// The formatter owns the real tree; the pipeline only needs enough to
/// route the node and report failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node kind, e.g. `import_statement` or `string_literal`.
    pub kind: String,
    /// Dotted location within the file, e.g. `module.MyClass.method`.
    pub path: String,
    /// Source text covered by the node.
    pub source: String,
}

impl Node {
    pub fn new(
        kind: impl Into<String>,
        path: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Read-only context handed to each plugin invocation.
#[derive(Debug, Clone)]
pub struct PluginContext {
    /// Effective formatter settings for this run.
    pub settings: SettingSet,
}

impl PluginContext {
    pub fn new(settings: SettingSet) -> Self {
        Self { settings }
    }
}

/// Line-generation callback a plugin may delegate to for sub-nodes.
pub type LineGen<'a> = &'a mut dyn FnMut(&Node) -> Vec<String>;

/// Capability contract for a formatter plugin.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    /// Declared option schema with default values.
    fn default_options(&self) -> PluginOptions {
        PluginOptions::new()
    }

    /// Apply the resolved options before any invocation.
    fn configure(&mut self, _options: &PluginOptions) -> Result<()> {
        Ok(())
    }

    /// Process one node.
    ///
    /// Return `Ok(Some(lines))` to replace the formatter's output for the
    /// node, `Ok(None)` to defer to the next plugin (or the formatter's
    /// own handling), and `Err` to report an invocation failure; the
    /// pipeline converts failures to deferrals.
    fn apply(
        &self,
        node: &Node,
        context: &PluginContext,
        line_gen: LineGen<'_>,
    ) -> Result<Option<Vec<String>>>;
}
