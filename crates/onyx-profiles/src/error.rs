//! Error types for onyx-profiles

use crate::profile::Origin;
use crate::settings::ValueKind;

/// Result type for profile operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or resolving profiles
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A profile name (or a parent reference) does not resolve to any
    /// catalog entry.
    #[error("unknown profile '{name}'{}", .referenced_by.as_ref().map(|p| format!(" (referenced as parent of '{p}')")).unwrap_or_default())]
    UnknownProfile {
        name: String,
        /// The profile whose `parent` field pointed here, if any.
        referenced_by: Option<String>,
    },

    /// The parent chain loops back on itself.
    #[error("profile inheritance cycle: {}", .chain.join(" -> "))]
    InheritanceCycle { chain: Vec<String> },

    /// One origin defines the same profile name twice.
    #[error("profile '{name}' defined twice in {origin} origin")]
    DuplicateInOrigin { name: String, origin: Origin },

    /// A settings key is not one of the known formatter options.
    #[error("unknown setting '{key}'")]
    UnknownSetting { key: String },

    /// A settings value has the wrong type for its key.
    #[error("invalid value for setting '{key}': expected {expected}, found {found}")]
    InvalidSettingValue {
        key: String,
        expected: ValueKind,
        found: String,
    },

    /// Failed to parse a persisted profile record.
    #[error("failed to parse profile record: {0}")]
    RecordParse(#[from] toml::de::Error),

    /// Failed to serialize a profile record.
    #[error("failed to serialize profile record: {0}")]
    RecordSerialize(#[from] toml::ser::Error),
}
