//! Error types for onyx-plugins

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors in the plugin layer.
///
/// Non-fatal conditions (a rejected descriptor, a failed invocation) are
/// not errors here; they are recorded as [`crate::Diagnostic`] entries so
/// one broken plugin never blocks the rest.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No descriptor with this name is registered.
    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),

    /// An option passed to `configure` is not in the plugin's declared
    /// schema, or has the wrong type.
    #[error("invalid option '{key}' for plugin '{plugin}': {reason}")]
    InvalidOption {
        plugin: String,
        key: String,
        reason: String,
    },

    /// A plugin reported a failure from its own logic.
    ///
    /// The pipeline converts this into a `PluginExecution` diagnostic and
    /// proceeds as if the plugin had deferred.
    #[error("{0}")]
    Failure(String),

    /// Failed to parse a persisted plugin record.
    #[error("failed to parse plugin record: {0}")]
    RecordParse(#[from] toml::de::Error),
}
