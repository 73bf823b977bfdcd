//! Error types for onyx-config

/// Result type for configuration resolution
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a resolution run.
///
/// Everything here is a configuration-authoring mistake; formatting must
/// not proceed on an ambiguous configuration, so none of these are
/// recovered.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two CLI flags in the same invocation disagree about one key.
    #[error("conflicting command-line flags for {subject}: {detail}")]
    ConflictingOverride { subject: String, detail: String },

    /// A `--plugin` flag that does not follow `NAME[:OPT=VALUE,...]`.
    #[error("invalid --plugin flag '{flag}': {reason}")]
    InvalidPluginFlag { flag: String, reason: String },

    /// A plugin option override is outside the plugin's declared schema
    /// or has the wrong type.
    #[error("invalid option '{key}' for plugin '{plugin}': {reason}")]
    InvalidPluginOption {
        plugin: String,
        key: String,
        reason: String,
    },

    /// Profile catalog or inheritance error.
    #[error(transparent)]
    Profiles(#[from] onyx_profiles::Error),

    /// Plugin registry error.
    #[error(transparent)]
    Plugins(#[from] onyx_plugins::Error),

    /// Failed to parse a plugins config table.
    #[error("failed to parse plugins config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
