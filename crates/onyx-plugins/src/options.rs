//! Plugin option values
//!
//! Plugin options are open-schema per plugin (each descriptor declares its
//! own defaults), unlike formatter settings which are a closed enumeration.
//! Overrides merge field-by-field because both sides describe the same
//! plugin instance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single plugin option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    /// Coerce a CLI-supplied string the way `--plugin name:opt=value`
    /// expects: `true`/`false` become booleans, integers and decimals
    /// become numbers, everything else stays a string.
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => return OptionValue::Bool(true),
            "false" => return OptionValue::Bool(false),
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return OptionValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return OptionValue::Float(f);
        }
        OptionValue::Str(raw.to_string())
    }

    /// Human-readable type name, used in option validation errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Int(_) => "integer",
            OptionValue::Float(_) => "float",
            OptionValue::Str(_) => "string",
        }
    }

    /// Whether `other` is an acceptable override for a default of this
    /// type. Integers may override floats (CLI coercion prefers `i64`).
    pub fn accepts(&self, other: &OptionValue) -> bool {
        matches!(
            (self, other),
            (OptionValue::Bool(_), OptionValue::Bool(_))
                | (OptionValue::Int(_), OptionValue::Int(_))
                | (OptionValue::Float(_), OptionValue::Float(_))
                | (OptionValue::Float(_), OptionValue::Int(_))
                | (OptionValue::Str(_), OptionValue::Str(_))
        )
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(i) => write!(f, "{i}"),
            OptionValue::Float(x) => write!(f, "{x}"),
            OptionValue::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Option name to value mapping for one plugin.
pub type PluginOptions = BTreeMap<String, OptionValue>;

/// Merge `overlay` onto `base` field-by-field, overlay wins per key.
pub fn merged(base: &PluginOptions, overlay: &PluginOptions) -> PluginOptions {
    let mut out = base.clone();
    for (key, value) in overlay {
        out.insert(key.clone(), value.clone());
    }
    out
}
