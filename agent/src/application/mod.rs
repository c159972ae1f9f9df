//! Application layer: port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain`, never on `crate::infra`.

pub mod ports;
pub mod services;

#[allow(unused_imports)]
pub use ports::{
    CommandRunner, ConfigStore, DiagnosticsSink, FileProbe, HostProbes, IdentityCollector,
    LaunchDaemonProbe, Level, PolicyCollector, ProcessEntry, ProcessSource, RegistryProbe,
    ServiceManager, SignatureSource,
};
