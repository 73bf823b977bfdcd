//! Non-fatal diagnostics from discovery and invocation
//!
//! These are recorded and reported rather than propagated: a descriptor
//! that fails validation is excluded, and a plugin whose invocation fails
//! is treated as having deferred. The formatting run always completes.

use std::fmt;

/// A recoverable plugin problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A discovered descriptor failed interface validation and was
    /// excluded from the registry.
    InvalidPlugin {
        /// Best-available identity: declared name or the source path.
        source: String,
        reason: String,
    },

    /// A plugin invocation failed; the pipeline proceeded as if the plugin
    /// had deferred.
    PluginExecution {
        plugin: String,
        node_path: String,
        message: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidPlugin { source, reason } => {
                write!(f, "invalid plugin descriptor from {source}: {reason}")
            }
            Diagnostic::PluginExecution {
                plugin,
                node_path,
                message,
            } => {
                write!(f, "plugin '{plugin}' failed at {node_path}: {message}")
            }
        }
    }
}
