//! Configuration resolution for Onyx
//!
//! The orchestration layer of the engine: it takes the loaded profile
//! catalog, the plugin registry, config-file plugin overrides, and the
//! structured CLI intent, and produces the run's immutable
//! [`ResolvedConfig`].
//!
//! ```text
//!  config files / CLI (external parsing)
//!        |                  |
//!  ProfileStore      PluginRegistry
//!        \                  /
//!         ConfigResolver + CliIntent
//!                  |
//!            ResolvedConfig  ->  PluginPipeline
//! ```

pub mod error;
pub mod intent;
pub mod resolved;
pub mod resolver;

pub use error::{Error, Result};
pub use intent::{CliIntent, PluginFlag, PluginOverride, PluginsFileConfig};
pub use resolved::{ResolvedConfig, ResolvedPlugin};
pub use resolver::{ConfigResolver, DEFAULT_PROFILE};
