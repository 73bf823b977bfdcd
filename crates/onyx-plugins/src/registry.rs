//! Plugin registry with stable registration order
//!
//! Descriptors are kept in the order they were first registered, not
//! name-sorted, because pipeline order is user-meaningful: configuration
//! order expresses intended precedence. A later candidate with the same
//! name replaces the earlier descriptor wholesale but keeps its slot.
//!
//! Callers supply candidates tier by tier in increasing precedence order
//! and, within one tier, in sorted-path order; the registry's last-wins
//! replacement then yields a deterministic outcome for every collision.

use crate::descriptor::{DescriptorCandidate, PluginDescriptor};
use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};

/// Registration-ordered catalog of validated plugin descriptors.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    descriptors: Vec<PluginDescriptor>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register candidates in order.
    ///
    /// Candidates failing interface validation are excluded and reported
    /// through the returned diagnostics; discovery of the rest continues.
    pub fn discover(
        candidates: impl IntoIterator<Item = DescriptorCandidate>,
    ) -> (Self, Vec<Diagnostic>) {
        let mut registry = Self::new();
        let mut diagnostics = Vec::new();
        for candidate in candidates {
            match candidate.validate() {
                Ok(descriptor) => registry.register(descriptor),
                Err(diag) => {
                    tracing::warn!(%diag, "excluding plugin candidate");
                    diagnostics.push(diag);
                }
            }
        }
        (registry, diagnostics)
    }

    /// Register a descriptor, replacing any same-named entry wholesale
    /// while keeping the original registration slot.
    pub fn register(&mut self, descriptor: PluginDescriptor) {
        match self.descriptors.iter_mut().find(|d| d.name == descriptor.name) {
            Some(existing) => {
                tracing::debug!(
                    name = %descriptor.name,
                    old = %existing.origin,
                    new = %descriptor.origin,
                    "plugin descriptor replaced"
                );
                *existing = descriptor;
            }
            None => self.descriptors.push(descriptor),
        }
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Result<&PluginDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| Error::UnknownPlugin(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.iter().any(|d| d.name == name)
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.descriptors.iter()
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
