//! Formatting profiles for Onyx
//!
//! This crate owns the profile side of the resolution engine:
//!
//! - **SettingSet**: typed formatter options with unknown-key rejection
//! - **ProfileStore**: the origin-tiered catalog (built-in < system < user
//!   < project, whole-record replacement by name)
//! - **resolver**: cycle-safe flattening of a profile's parent chain
//!
//! File discovery and TOML I/O live in the caller; this crate only consumes
//! parsed records and hands back effective settings.

pub mod error;
pub mod profile;
pub mod resolver;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
pub use profile::{Origin, Profile, ProfileRecord};
pub use resolver::resolve;
pub use settings::{SettingKey, SettingSet, SettingValue, ValueKind};
pub use store::{ProfileStore, builtin_profiles};
