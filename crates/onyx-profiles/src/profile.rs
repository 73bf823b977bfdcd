//! Profile records and origin tiers
//!
//! A profile is a named, inheritable bundle of formatter settings. The
//! persisted form (`ProfileRecord`) carries raw TOML values; converting it
//! into a `Profile` validates every setting against the known enumeration.

use crate::error::Result;
use crate::settings::SettingSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

fn default_record_version() -> String {
    "1.0".to_string()
}

/// Where a catalog entry was loaded from.
///
/// Ordered by precedence: a later origin fully replaces a same-named entry
/// from an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    BuiltIn,
    System,
    User,
    Project,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::BuiltIn => "built-in",
            Origin::System => "system",
            Origin::User => "user",
            Origin::Project => "project",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named bundle of formatter settings with an optional parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Parent profile name; forms a directed edge in the inheritance graph.
    pub parent: Option<String>,
    pub settings: SettingSet,
    pub origin: Origin,
}

impl Profile {
    /// Convert to the persisted record form.
    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            parent: self.parent.clone(),
            settings: self.settings.to_toml_map(),
        }
    }
}

/// Persisted profile form, the `[profile]` table of a profile file.
///
/// Settings are kept as raw TOML values here; `into_profile` validates them
/// against the known key enumeration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_record_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub settings: BTreeMap<String, toml::Value>,
}

/// Top-level document wrapper so profile files read `[profile] ...`.
#[derive(Debug, Serialize, Deserialize)]
struct ProfileDocument {
    profile: ProfileRecord,
}

impl ProfileRecord {
    /// Parse a record from the TOML content of a profile file.
    ///
    /// # Example
    ///
    /// ```
    /// use onyx_profiles::ProfileRecord;
    ///
    /// let record = ProfileRecord::parse(r#"
    /// [profile]
    /// name = "compact"
    /// parent = "default"
    ///
    /// [profile.settings]
    /// line_length = 79
    /// "#).unwrap();
    ///
    /// assert_eq!(record.name, "compact");
    /// assert_eq!(record.parent.as_deref(), Some("default"));
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let document: ProfileDocument = toml::from_str(content)?;
        Ok(document.profile)
    }

    /// Serialize back into profile-file TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        let document = ProfileDocument {
            profile: self.clone(),
        };
        Ok(toml::to_string_pretty(&document)?)
    }

    /// Validate the raw settings and produce a `Profile` for the given
    /// origin tier. Unknown keys and mistyped values are fatal here.
    pub fn into_profile(self, origin: Origin) -> Result<Profile> {
        let settings = SettingSet::from_toml_map(&self.settings)?;
        Ok(Profile {
            name: self.name,
            description: self.description,
            version: self.version,
            parent: self.parent,
            settings,
            origin,
        })
    }
}
