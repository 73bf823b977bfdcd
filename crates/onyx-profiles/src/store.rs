//! Profile catalog with origin precedence
//!
//! The store holds one profile per name after merging the origin tiers.
//! A same-named profile from a higher-precedence origin replaces the lower
//! one as a whole record; there is no field-level merge across origins.

use crate::error::{Error, Result};
use crate::profile::{Origin, Profile};
use crate::settings::{SettingKey, SettingSet, SettingValue};
use std::collections::{HashMap, HashSet};

/// Catalog of loaded profiles, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: HashMap<String, Profile>,
}

impl ProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from per-origin profile lists.
    ///
    /// Sources must be supplied in increasing precedence order (built-in,
    /// system, user, project). Within one source the same name twice is a
    /// `DuplicateInOrigin` error; across sources a later entry replaces an
    /// earlier one wholesale.
    pub fn load<I, P>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Origin, P)>,
        P: IntoIterator<Item = Profile>,
    {
        let mut store = Self::new();
        for (origin, profiles) in sources {
            let mut seen_in_origin = HashSet::new();
            for profile in profiles {
                if !seen_in_origin.insert(profile.name.clone()) {
                    return Err(Error::DuplicateInOrigin {
                        name: profile.name,
                        origin,
                    });
                }
                if let Some(replaced) = store.profiles.get(&profile.name) {
                    tracing::debug!(
                        name = %profile.name,
                        old = %replaced.origin,
                        new = %origin,
                        "profile replaced by higher-precedence origin"
                    );
                }
                store.profiles.insert(profile.name.clone(), profile);
            }
        }
        Ok(store)
    }

    /// Load a catalog seeded with the built-in profiles.
    pub fn load_with_builtins<I, P>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Origin, P)>,
        P: IntoIterator<Item = Profile>,
    {
        let mut store = Self::load(sources)?;
        for profile in builtin_profiles() {
            store
                .profiles
                .entry(profile.name.clone())
                .or_insert(profile);
        }
        Ok(store)
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// All profile names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        names.sort();
        names
    }

    /// Iterate over profiles in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        let mut profiles: Vec<&Profile> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        profiles.into_iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// The built-in profile catalog.
///
/// `default` is the root most profiles inherit from; the rest mirror common
/// editor and style-guide conventions.
pub fn builtin_profiles() -> Vec<Profile> {
    fn builtin(
        name: &str,
        description: &str,
        parent: Option<&str>,
        settings: Vec<(SettingKey, SettingValue)>,
    ) -> Profile {
        Profile {
            name: name.to_string(),
            description: description.to_string(),
            version: "1.0".to_string(),
            parent: parent.map(String::from),
            settings: SettingSet::from_pairs(settings),
            origin: Origin::BuiltIn,
        }
    }

    vec![
        builtin(
            "default",
            "The formatter's default settings",
            None,
            vec![
                (SettingKey::LineLength, SettingValue::Int(88)),
                (
                    SettingKey::TargetVersion,
                    SettingValue::List(vec!["py38".to_string()]),
                ),
                (SettingKey::SkipStringNormalization, SettingValue::Bool(false)),
                (SettingKey::SkipMagicTrailingComma, SettingValue::Bool(false)),
            ],
        ),
        builtin(
            "pycharm",
            "Profile compatible with PyCharm defaults",
            Some("default"),
            vec![
                (SettingKey::LineLength, SettingValue::Int(120)),
                (SettingKey::SkipStringNormalization, SettingValue::Bool(true)),
            ],
        ),
        builtin(
            "vscode",
            "Profile compatible with VS Code defaults",
            Some("default"),
            vec![(SettingKey::LineLength, SettingValue::Int(100))],
        ),
        builtin(
            "google",
            "Profile following the Google style guide",
            None,
            vec![
                (SettingKey::LineLength, SettingValue::Int(80)),
                (
                    SettingKey::TargetVersion,
                    SettingValue::List(vec!["py38".to_string()]),
                ),
                (SettingKey::SkipStringNormalization, SettingValue::Bool(true)),
            ],
        ),
        builtin(
            "compact",
            "Compact formatting with a shorter line length",
            Some("default"),
            vec![
                (SettingKey::LineLength, SettingValue::Int(79)),
                (SettingKey::SkipMagicTrailingComma, SettingValue::Bool(true)),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, origin: Origin, line_length: i64) -> Profile {
        Profile {
            name: name.to_string(),
            description: format!("{name} from {origin}"),
            version: "1.0".to_string(),
            parent: None,
            settings: SettingSet::from_pairs([(
                SettingKey::LineLength,
                SettingValue::Int(line_length),
            )]),
            origin,
        }
    }

    #[test]
    fn later_origin_replaces_whole_record() {
        let store = ProfileStore::load([
            (Origin::BuiltIn, vec![profile("team", Origin::BuiltIn, 88)]),
            (Origin::System, vec![profile("team", Origin::System, 100)]),
            (Origin::Project, vec![profile("team", Origin::Project, 120)]),
        ])
        .unwrap();

        let team = store.get("team").unwrap();
        assert_eq!(team.origin, Origin::Project);
        assert_eq!(
            team.settings.get(SettingKey::LineLength).unwrap().as_int(),
            Some(120)
        );
        // Whole-record replacement: description comes from project too
        assert_eq!(team.description, "team from project");
    }

    #[test]
    fn duplicate_within_origin_is_fatal() {
        let err = ProfileStore::load([(
            Origin::User,
            vec![profile("dup", Origin::User, 88), profile("dup", Origin::User, 90)],
        )])
        .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateInOrigin { name, origin: Origin::User } if name == "dup"
        ));
    }

    #[test]
    fn builtins_are_seeded_but_overridable() {
        let store = ProfileStore::load_with_builtins([(
            Origin::Project,
            vec![profile("pycharm", Origin::Project, 140)],
        )])
        .unwrap();

        assert!(store.contains("default"));
        assert_eq!(store.get("pycharm").unwrap().origin, Origin::Project);
    }

    #[test]
    fn builtin_catalog_parents_resolve() {
        let store = ProfileStore::load_with_builtins::<_, Vec<Profile>>([]).unwrap();
        for profile in store.iter() {
            if let Some(parent) = &profile.parent {
                assert!(store.contains(parent), "dangling parent {parent}");
            }
        }
    }
}
