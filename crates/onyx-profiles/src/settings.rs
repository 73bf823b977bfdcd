//! Typed formatter settings
//!
//! A `SettingSet` is the atomic unit merged at every configuration layer.
//! Keys are a closed enumeration of known formatter options; anything else
//! is rejected at load time rather than silently ignored, so a typo in a
//! config file surfaces immediately.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// The known formatter options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SettingKey {
    LineLength,
    TargetVersion,
    SkipStringNormalization,
    SkipMagicTrailingComma,
    Preview,
    Unstable,
}

impl SettingKey {
    /// Every known key, in canonical order.
    pub const ALL: [SettingKey; 6] = [
        SettingKey::LineLength,
        SettingKey::TargetVersion,
        SettingKey::SkipStringNormalization,
        SettingKey::SkipMagicTrailingComma,
        SettingKey::Preview,
        SettingKey::Unstable,
    ];

    /// The key's name as written in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::LineLength => "line_length",
            SettingKey::TargetVersion => "target_version",
            SettingKey::SkipStringNormalization => "skip_string_normalization",
            SettingKey::SkipMagicTrailingComma => "skip_magic_trailing_comma",
            SettingKey::Preview => "preview",
            SettingKey::Unstable => "unstable",
        }
    }

    /// Look up a key by its config-file name.
    ///
    /// Returns `Error::UnknownSetting` for anything outside the known
    /// enumeration.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| Error::UnknownSetting {
                key: name.to_string(),
            })
    }

    /// The value type this key requires.
    pub fn expected_kind(&self) -> ValueKind {
        match self {
            SettingKey::LineLength => ValueKind::Int,
            SettingKey::TargetVersion => ValueKind::List,
            SettingKey::SkipStringNormalization
            | SettingKey::SkipMagicTrailingComma
            | SettingKey::Preview
            | SettingKey::Unstable => ValueKind::Bool,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of a setting value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Str,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Str => "string",
            ValueKind::List => "list of strings",
        };
        f.write_str(s)
    }
}

/// A typed setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl SettingValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SettingValue::Bool(_) => ValueKind::Bool,
            SettingValue::Int(_) => ValueKind::Int,
            SettingValue::Str(_) => ValueKind::Str,
            SettingValue::List(_) => ValueKind::List,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Convert a raw TOML value, checking it against the key's expected type.
    pub fn from_toml(key: SettingKey, value: &toml::Value) -> Result<Self> {
        let converted = match (key.expected_kind(), value) {
            (ValueKind::Bool, toml::Value::Boolean(b)) => Some(SettingValue::Bool(*b)),
            (ValueKind::Int, toml::Value::Integer(i)) => Some(SettingValue::Int(*i)),
            (ValueKind::Str, toml::Value::String(s)) => Some(SettingValue::Str(s.clone())),
            (ValueKind::List, toml::Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
                .map(SettingValue::List),
            _ => None,
        };
        converted.ok_or_else(|| Error::InvalidSettingValue {
            key: key.as_str().to_string(),
            expected: key.expected_kind(),
            found: value.type_str().to_string(),
        })
    }

    /// Parse a CLI-supplied string (`-S key=value`) into the key's type.
    ///
    /// Integers must parse as `i64`, booleans as `true`/`false`, and list
    /// values are comma-separated.
    pub fn parse_for(key: SettingKey, raw: &str) -> Result<Self> {
        let invalid = || Error::InvalidSettingValue {
            key: key.as_str().to_string(),
            expected: key.expected_kind(),
            found: format!("'{raw}'"),
        };
        match key.expected_kind() {
            ValueKind::Bool => match raw {
                "true" => Ok(SettingValue::Bool(true)),
                "false" => Ok(SettingValue::Bool(false)),
                _ => Err(invalid()),
            },
            ValueKind::Int => raw.parse().map(SettingValue::Int).map_err(|_| invalid()),
            ValueKind::Str => Ok(SettingValue::Str(raw.to_string())),
            ValueKind::List => Ok(SettingValue::List(
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            )),
        }
    }

    /// Serialize back into a TOML value for persisted records.
    pub fn to_toml(&self) -> toml::Value {
        match self {
            SettingValue::Bool(b) => toml::Value::Boolean(*b),
            SettingValue::Int(i) => toml::Value::Integer(*i),
            SettingValue::Str(s) => toml::Value::String(s.clone()),
            SettingValue::List(items) => toml::Value::Array(
                items
                    .iter()
                    .map(|s| toml::Value::String(s.clone()))
                    .collect(),
            ),
        }
    }
}

/// An immutable mapping of formatter option to typed value.
///
/// Backed by a `BTreeMap` so iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingSet {
    values: BTreeMap<SettingKey, SettingValue>,
}

impl SettingSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from typed pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (SettingKey, SettingValue)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Build from a raw TOML table, rejecting unknown keys and mistyped
    /// values.
    pub fn from_toml_map(map: &BTreeMap<String, toml::Value>) -> Result<Self> {
        let mut values = BTreeMap::new();
        for (name, raw) in map {
            let key = SettingKey::from_name(name)?;
            values.insert(key, SettingValue::from_toml(key, raw)?);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: SettingKey) -> Option<&SettingValue> {
        self.values.get(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SettingKey, SettingValue> {
        self.values.iter()
    }

    /// Merge an overlay onto this set, last write wins per key.
    ///
    /// Keys absent from the overlay retain this set's value.
    pub fn merged(&self, overlay: &SettingSet) -> SettingSet {
        let mut values = self.values.clone();
        for (key, value) in &overlay.values {
            values.insert(*key, value.clone());
        }
        SettingSet { values }
    }

    /// Serialize into a raw TOML table for persisted records.
    pub fn to_toml_map(&self) -> BTreeMap<String, toml::Value> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_toml()))
            .collect()
    }
}
