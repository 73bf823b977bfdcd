//! Plugin descriptors and candidate validation
//!
//! A descriptor identifies a plugin without containing its logic. The
//! filesystem walk (an external collaborator) produces raw candidates;
//! validation here decides which become registry entries. A candidate
//! missing its identity fields is excluded with a diagnostic, never a
//! hard failure, so one broken file does not block the other plugins.

use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::options::{OptionValue, PluginOptions};
use onyx_profiles::Origin;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw plugin record as handed over by discovery, before validation.
#[derive(Debug, Clone)]
pub struct DescriptorCandidate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    /// Symbol or callable the host loads to invoke the plugin.
    pub entry_point: Option<String>,
    pub default_options: PluginOptions,
    pub enabled: Option<bool>,
    pub origin: Origin,
    pub source_path: String,
}

/// A validated plugin descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginDescriptor {
    pub name: String,
    pub description: String,
    pub version: String,
    pub entry_point: String,
    pub default_options: PluginOptions,
    /// Default enablement as declared by the plugin itself. `None` means
    /// the record did not say; the resolver then falls back to the global
    /// enable-by-default flag.
    pub enabled: Option<bool>,
    pub origin: Origin,
    pub source_path: String,
}

impl DescriptorCandidate {
    /// Validate the interface contract: the four identity fields must be
    /// present and non-empty.
    ///
    /// Returns the validated descriptor, or the diagnostic that explains
    /// the exclusion.
    pub fn validate(self) -> std::result::Result<PluginDescriptor, Diagnostic> {
        let reject = |reason: &str, name: &Option<String>| Diagnostic::InvalidPlugin {
            source: name.clone().unwrap_or_else(|| self.source_path.clone()),
            reason: reason.to_string(),
        };

        let missing = |field: &str| format!("missing identity field '{field}'");
        let name = match self.name.as_deref() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => return Err(reject(&missing("name"), &None)),
        };
        let description = match self.description.as_deref() {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => return Err(reject(&missing("description"), &self.name)),
        };
        let version = match self.version.as_deref() {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => return Err(reject(&missing("version"), &self.name)),
        };
        let entry_point = match self.entry_point.as_deref() {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => return Err(reject("missing invocation entry point", &self.name)),
        };

        Ok(PluginDescriptor {
            name,
            description,
            version,
            entry_point,
            default_options: self.default_options,
            enabled: self.enabled,
            origin: self.origin,
            source_path: self.source_path,
        })
    }
}

/// Persisted plugin record, the `[plugin]` table of a plugin manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub entry_point: Option<String>,
    #[serde(default)]
    pub default_options: BTreeMap<String, OptionValue>,
    pub enabled: Option<bool>,
}

/// Top-level document wrapper so manifests read `[plugin] ...`.
#[derive(Debug, Deserialize)]
struct PluginDocument {
    plugin: PluginRecord,
}

impl PluginRecord {
    /// Parse a record from the TOML content of a plugin manifest.
    pub fn parse(content: &str) -> Result<Self> {
        let document: PluginDocument = toml::from_str(content)?;
        Ok(document.plugin)
    }

    /// Attach discovery metadata, producing a candidate for validation.
    pub fn into_candidate(self, origin: Origin, source_path: impl Into<String>) -> DescriptorCandidate {
        DescriptorCandidate {
            name: self.name,
            description: self.description,
            version: self.version,
            entry_point: self.entry_point,
            default_options: self.default_options,
            enabled: self.enabled,
            origin,
            source_path: source_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_candidate(name: &str) -> DescriptorCandidate {
        DescriptorCandidate {
            name: Some(name.to_string()),
            description: Some("A plugin".to_string()),
            version: Some("0.1.0".to_string()),
            entry_point: Some(format!("{name}:apply")),
            default_options: PluginOptions::new(),
            enabled: None,
            origin: Origin::User,
            source_path: format!("/plugins/{name}.toml"),
        }
    }

    #[test]
    fn complete_candidate_validates() {
        let descriptor = full_candidate("import_sorter").validate().unwrap();
        assert_eq!(descriptor.name, "import_sorter");
        // the record did not say, so enablement is left to the resolver
        assert_eq!(descriptor.enabled, None);
    }

    #[test]
    fn missing_entry_point_is_excluded_with_diagnostic() {
        let mut candidate = full_candidate("broken");
        candidate.entry_point = None;
        let diag = candidate.validate().unwrap_err();
        match diag {
            Diagnostic::InvalidPlugin { source, reason } => {
                assert_eq!(source, "broken");
                assert!(reason.contains("entry point"), "got: {reason}");
            }
            other => panic!("expected InvalidPlugin, got {other}"),
        }
    }

    #[test]
    fn nameless_candidate_reports_its_source_path() {
        let mut candidate = full_candidate("x");
        candidate.name = None;
        let diag = candidate.validate().unwrap_err();
        match diag {
            Diagnostic::InvalidPlugin { source, .. } => {
                assert_eq!(source, "/plugins/x.toml");
            }
            other => panic!("expected InvalidPlugin, got {other}"),
        }
    }

    #[test]
    fn record_parses_with_default_options() {
        let record = PluginRecord::parse(
            r#"
[plugin]
name = "string_normalizer"
description = "Normalizes string quotes"
version = "0.2.0"
entry_point = "string_normalizer:apply"
enabled = false

[plugin.default_options]
quote_style = "double"
max_width = 88
"#,
        )
        .unwrap();

        assert_eq!(record.enabled, Some(false));
        assert_eq!(
            record.default_options["quote_style"],
            OptionValue::Str("double".to_string())
        );
        assert_eq!(record.default_options["max_width"], OptionValue::Int(88));
    }
}
