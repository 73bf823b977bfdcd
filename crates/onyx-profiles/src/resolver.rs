//! Profile inheritance resolution
//!
//! Flattens a profile's parent chain into one effective `SettingSet`.
//! Parent pointers form a tree (single inheritance), so there is exactly
//! one chain to walk; the walk is bounded by the catalog size and a
//! repeated name fails with `InheritanceCycle`.

use crate::error::{Error, Result};
use crate::profile::Profile;
use crate::settings::SettingSet;
use crate::store::ProfileStore;
use std::collections::HashSet;

/// Resolve the effective settings for `name`.
///
/// Walks the parent chain leaf-to-root, then merges root-to-leaf: each
/// child's settings override same-named keys from its ancestors, and keys a
/// child leaves unset retain the closest ancestor's value.
///
/// # Errors
///
/// - `UnknownProfile` if `name` or any referenced parent is absent from the
///   store (the error names the child that referenced it);
/// - `InheritanceCycle` if a profile name repeats along the chain, with the
///   chain in walk order.
pub fn resolve(name: &str, store: &ProfileStore) -> Result<SettingSet> {
    let mut chain = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = name;

    loop {
        let profile = store.get(current).ok_or_else(|| Error::UnknownProfile {
            name: current.to_string(),
            referenced_by: chain.last().map(|p: &&Profile| p.name.clone()),
        })?;
        if !seen.insert(&profile.name) {
            let mut cycle: Vec<String> = chain.iter().map(|p| p.name.clone()).collect();
            cycle.push(profile.name.clone());
            return Err(Error::InheritanceCycle { chain: cycle });
        }
        chain.push(profile);
        match &profile.parent {
            Some(parent) => current = parent,
            None => break,
        }
    }

    tracing::debug!(profile = name, depth = chain.len(), "resolved inheritance chain");

    // chain is leaf-first; fold from the root so children override.
    let mut effective = SettingSet::new();
    for profile in chain.iter().rev() {
        effective = effective.merged(&profile.settings);
    }
    Ok(effective)
}
