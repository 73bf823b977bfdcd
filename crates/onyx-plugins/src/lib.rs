//! Plugin system for Onyx
//!
//! This crate owns the plugin side of the resolution engine:
//!
//! - **Descriptors**: validated metadata records for discovered plugins;
//!   candidates missing the interface contract are excluded with a
//!   diagnostic, not a failure
//! - **PluginRegistry**: registration-ordered catalog with whole-descriptor
//!   replacement by name across origin tiers
//! - **Plugin trait**: the invocation contract (`apply` returning lines or
//!   a deferral)
//! - **PluginPipeline**: first-match-wins invocation over formatter nodes,
//!   converting failures into deferrals
//!
//! Filesystem discovery and dynamic loading live in the host; this crate
//! only validates, orders, and invokes.

pub mod descriptor;
pub mod diagnostics;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod plugin;
pub mod registry;

pub use descriptor::{DescriptorCandidate, PluginDescriptor, PluginRecord};
pub use diagnostics::Diagnostic;
pub use error::{Error, Result};
pub use options::{OptionValue, PluginOptions, merged};
pub use pipeline::PluginPipeline;
pub use plugin::{LineGen, Node, Plugin, PluginContext};
pub use registry::PluginRegistry;
