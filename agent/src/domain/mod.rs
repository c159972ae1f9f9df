//! Domain layer: pure types, parsers and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs` or `std::process`. All functions are synchronous and
//! take data in, returning data out.

pub mod config;
pub mod error;
pub mod identity;
pub mod platform;
pub mod policy;
pub mod registry;
pub mod service;
pub mod signatures;

#[allow(unused_imports)]
pub use config::{CollectorConfig, ProbeConfig, ScanConfig};
#[allow(unused_imports)]
pub use error::{CollectorFault, CommandError, ConfigError, SignatureError};
#[allow(unused_imports)]
pub use platform::Platform;
#[allow(unused_imports)]
pub use registry::{RegistryHive, RegistryPath};
#[allow(unused_imports)]
pub use signatures::{SignatureLint, VersionLookup, lint_signatures, validate_signatures};
